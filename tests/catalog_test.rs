//! Inventory and menu (recipe) persistence.

mod common;

use cafe_backend::{common::error::AppError, models::inventory::NewInventoryItem};
use rust_decimal_macros::dec;
use sqlx::PgPool;

use common::{count, line, menu_item, new_menu_item, order, state, stock};

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn invalid_inventory_items_are_never_persisted(pool: PgPool) {
    let state = state(pool);
    let valid = NewInventoryItem {
        name: "Milk".into(),
        quantity: 10,
        unit: "L".into(),
        price_per_unit: dec!(1.2),
    };
    let invalid = [
        NewInventoryItem { name: String::new(), ..valid.clone() },
        NewInventoryItem { quantity: 0, ..valid.clone() },
        NewInventoryItem { unit: String::new(), ..valid.clone() },
        NewInventoryItem { price_per_unit: dec!(0), ..valid.clone() },
    ];

    for item in &invalid {
        let result = state.inventory_service.create_item(&state.db_pool, item).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))), "{item:?}");
    }
    assert_eq!(count(&state.db_pool, "inventory").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn inventory_crud_round_trip(pool: PgPool) {
    let state = state(pool);
    let svc = &state.inventory_service;
    let milk = stock(&state, "Milk", 10).await;

    let updated = svc
        .update_item(
            &state.db_pool,
            milk.id,
            &NewInventoryItem {
                name: "Whole milk".into(),
                quantity: 20,
                unit: "L".into(),
                price_per_unit: dec!(1.5),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Whole milk");
    assert_eq!(updated.quantity, 20);
    assert!(updated.last_updated >= milk.last_updated);

    assert_eq!(svc.get_all_items(&state.db_pool).await.unwrap().len(), 1);

    svc.delete_item(&state.db_pool, milk.id).await.unwrap();
    assert!(matches!(
        svc.get_item(&state.db_pool, milk.id).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        svc.delete_item(&state.db_pool, milk.id).await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn ingredient_used_by_a_recipe_cannot_be_deleted(pool: PgPool) {
    let state = state(pool);
    let milk = stock(&state, "Milk", 10).await;
    menu_item(&state, "Latte", &[(milk.id, 2)]).await;

    let result = state.inventory_service.delete_item(&state.db_pool, milk.id).await;
    assert!(matches!(result, Err(AppError::InUse { .. })));
    assert_eq!(count(&state.db_pool, "inventory").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn recipe_round_trips_in_declared_order(pool: PgPool) {
    let state = state(pool);
    let first = stock(&state, "Coffee", 10).await;
    let second = stock(&state, "Milk", 10).await;

    // Declarados fora da ordem do id.
    let created = menu_item(&state, "Latte", &[(second.id, 3), (first.id, 2)]).await;

    let requirements = state
        .menu_service
        .requirements_for(&state.db_pool, created.id)
        .await
        .unwrap();
    let pairs: Vec<(i32, i32)> =
        requirements.iter().map(|r| (r.ingredient_id, r.quantity_required)).collect();
    assert_eq!(pairs, vec![(second.id, 3), (first.id, 2)]);

    let fetched = state.menu_service.get_by_id(&state.db_pool, created.id).await.unwrap();
    assert_eq!(fetched.ingredients, requirements);

    let all = state.menu_service.get_all(&state.db_pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].ingredients, requirements);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn update_replaces_the_whole_recipe(pool: PgPool) {
    let state = state(pool);
    let coffee = stock(&state, "Coffee", 10).await;
    let milk = stock(&state, "Milk", 10).await;
    let created = menu_item(&state, "Latte", &[(coffee.id, 1), (milk.id, 2)]).await;

    let updated = state
        .menu_service
        .update(&state.db_pool, created.id, &new_menu_item("Espresso", &[(coffee.id, 2)]))
        .await
        .unwrap();
    assert_eq!(updated.name, "Espresso");

    let requirements = state
        .menu_service
        .requirements_for(&state.db_pool, created.id)
        .await
        .unwrap();
    assert_eq!(requirements.len(), 1);
    assert_eq!(requirements[0].ingredient_id, coffee.id);
    assert_eq!(requirements[0].quantity_required, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn recipe_with_an_unknown_ingredient_is_rejected_whole(pool: PgPool) {
    let state = state(pool);
    let milk = stock(&state, "Milk", 10).await;

    let result = state
        .menu_service
        .create(&state.db_pool, &new_menu_item("Latte", &[(milk.id, 2), (milk.id + 1000, 1)]))
        .await;

    assert!(matches!(result, Err(AppError::NotFound { entity: "Inventory item", .. })));
    assert_eq!(count(&state.db_pool, "menu_items").await, 0);
    assert_eq!(count(&state.db_pool, "menu_item_ingredients").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_a_menu_item_removes_its_recipe_and_order_lines(pool: PgPool) {
    let state = state(pool);
    let milk = stock(&state, "Milk", 10).await;
    let latte = menu_item(&state, "Latte", &[(milk.id, 1)]).await;
    let order = order(&state).await;
    state
        .order_service
        .add_order_item(&state.db_pool, &line(order.id, latte.id, 1))
        .await
        .unwrap();

    state.menu_service.delete(&state.db_pool, latte.id).await.unwrap();

    assert_eq!(count(&state.db_pool, "menu_items").await, 0);
    assert_eq!(count(&state.db_pool, "menu_item_ingredients").await, 0);
    assert_eq!(count(&state.db_pool, "order_items").await, 0);
    assert!(matches!(
        state.menu_service.delete(&state.db_pool, latte.id).await,
        Err(AppError::NotFound { .. })
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleting_an_unknown_menu_item_leaves_the_catalog_alone(pool: PgPool) {
    let state = state(pool);
    let milk = stock(&state, "Milk", 10).await;
    let latte = menu_item(&state, "Latte", &[(milk.id, 1)]).await;
    let order = order(&state).await;
    state
        .order_service
        .add_order_item(&state.db_pool, &line(order.id, latte.id, 1))
        .await
        .unwrap();

    let result = state.menu_service.delete(&state.db_pool, latte.id + 1000).await;
    assert!(matches!(result, Err(AppError::NotFound { entity: "Menu item", .. })));

    assert_eq!(count(&state.db_pool, "menu_items").await, 1);
    assert_eq!(count(&state.db_pool, "menu_item_ingredients").await, 1);
    assert_eq!(count(&state.db_pool, "order_items").await, 1);
}
