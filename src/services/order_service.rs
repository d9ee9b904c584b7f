// src/services/order_service.rs

use sqlx::{Acquire, Executor, Postgres};
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{MenuRepository, OrderRepository, StatusHistoryRepository},
    models::orders::{
        NewOrder, NewOrderItem, Order, OrderItem, OrderItemReceipt, OrderStatusHistoryEntry,
        STATUS_MAX_LEN, STATUS_PENDING,
    },
    services::inventory_service::InventoryService,
};

/// Remove espaços do status pedido e aplica os limites da coluna.
pub fn normalize_status(raw: &str) -> Result<&str, AppError> {
    let status = raw.trim();
    if status.is_empty() {
        return Err(AppError::invalid_field("status", "required", "Status is required."));
    }
    if status.chars().count() > STATUS_MAX_LEN {
        return Err(AppError::invalid_field(
            "status",
            "length",
            "Status must be at most 50 characters.",
        ));
    }
    Ok(status)
}

/// Motor de atendimento de pedidos.
#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    menu_repo: MenuRepository,
    history_repo: StatusHistoryRepository,
    inventory_service: InventoryService,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        menu_repo: MenuRepository,
        history_repo: StatusHistoryRepository,
        inventory_service: InventoryService,
    ) -> Self {
        Self { order_repo, menu_repo, history_repo, inventory_service }
    }

    // --- PEDIDOS ---

    /// Pedidos novos começam em `pending`, e esse primeiro status já entra no histórico.
    pub async fn create_order<'e, E>(&self, executor: E, order: &NewOrder) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        order.validate()?;

        let mut tx = executor.begin().await?;
        let created = self.order_repo.create_order(&mut *tx, order).await?;
        self.history_repo.append(&mut *tx, created.id, STATUS_PENDING).await?;
        tx.commit().await?;

        tracing::info!(
            "✅ Pedido {} criado para o cliente {} (total {})",
            created.id, created.customer_id, created.total_amount
        );
        Ok(created)
    }

    pub async fn get_all_orders<'e, E>(&self, executor: E) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.order_repo.get_all_orders(executor).await
    }

    pub async fn get_order<'e, E>(&self, executor: E, id: i32) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.order_repo
            .get_order(executor, id)
            .await?
            .ok_or_else(|| AppError::not_found("Order", id))
    }

    // --- ITENS DO PEDIDO ---

    /// Registra uma linha do pedido e consome os ingredientes: tudo ou nada.
    pub async fn add_order_item<'e, E>(
        &self,
        executor: E,
        item: &NewOrderItem,
    ) -> Result<OrderItemReceipt, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        item.validate()?;

        // Qualquer retorno antecipado descarta `tx` e desfaz tudo.
        let mut tx = executor.begin().await?;

        // 0. Linhas referenciadas; o item do cardápio fica em FOR SHARE para a receita não mudar
        if !self.order_repo.order_exists(&mut *tx, item.order_id).await? {
            return Err(AppError::not_found("Order", item.order_id));
        }
        if !self.menu_repo.lock_for_share(&mut *tx, item.menu_item_id).await? {
            return Err(AppError::not_found("Menu item", item.menu_item_id));
        }

        // 1-2. Receita e suficiência sobre as linhas de estoque bloqueadas
        let plan = match self
            .inventory_service
            .check_sufficiency(&mut *tx, item.menu_item_id, item.quantity)
            .await
        {
            Ok(plan) => plan,
            Err(e) => {
                if let AppError::InsufficientStock { ingredient_id, required, available, .. } = &e {
                    tracing::warn!(
                        "Pedido {}: item {} x{} recusado, ingrediente {} precisa de {} mas tem {}",
                        item.order_id, item.menu_item_id, item.quantity, ingredient_id, required, available
                    );
                }
                return Err(e);
            }
        };

        // 3. Linha do pedido
        let order_item = self.order_repo.insert_order_item(&mut *tx, item).await?;

        // 4. Estoque: exatamente o plano verificado
        let updated_stock = self.inventory_service.deduct(&mut *tx, &plan).await?;

        tx.commit().await?;

        tracing::info!(
            "Pedido {}: linha {} adicionada (item {} x{}), {} ingrediente(s) debitado(s)",
            order_item.order_id,
            order_item.id,
            order_item.menu_item_id,
            order_item.quantity,
            updated_stock.len()
        );
        Ok(OrderItemReceipt { order_item, updated_stock })
    }

    pub async fn list_order_items<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        if !self.order_repo.order_exists(&mut *conn, order_id).await? {
            return Err(AppError::not_found("Order", order_id));
        }
        self.order_repo.list_order_items(&mut *conn, order_id).await
    }

    /// Remove só a linha. O estoque consumido não é devolvido.
    pub async fn delete_order_item<'e, E>(&self, executor: E, id: i32) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.order_repo.delete_order_item(executor, id).await? == 0 {
            return Err(AppError::not_found("Order item", id));
        }
        tracing::info!("Linha {} removida, estoque mantido", id);
        Ok(())
    }

    // --- STATUS ---

    /// Define o status e registra no histórico.
    ///
    /// O insert do histórico roda num savepoint. Se falhar, a mudança de status
    /// ainda é confirmada e quem chamou recebe `AppError::PartialCommit`.
    pub async fn update_order_status<'e, E>(
        &self,
        executor: E,
        order_id: i32,
        new_status: &str,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let status = normalize_status(new_status)?;

        let mut tx = executor.begin().await?;

        let order = self
            .order_repo
            .update_status(&mut *tx, order_id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Order", order_id))?;

        let mut savepoint = tx.begin().await?;
        let appended = self.history_repo.append(&mut *savepoint, order_id, status).await;

        match appended {
            Ok(_) => {
                savepoint.commit().await?;
                tx.commit().await?;
                tracing::info!("Pedido {} passou para '{}'", order_id, status);
                Ok(order)
            }
            Err(e) => {
                savepoint.rollback().await?;
                tx.commit().await?;
                tracing::error!("🔥 Pedido {}: falha ao gravar o histórico de status: {:?}", order_id, e);
                Err(AppError::PartialCommit {
                    committed: format!("Order {order_id} status updated to '{status}'"),
                    failed: "the status history entry could not be recorded".into(),
                })
            }
        }
    }

    pub async fn history_for<'e, E>(
        &self,
        executor: E,
        order_id: i32,
    ) -> Result<Vec<OrderStatusHistoryEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        if !self.order_repo.order_exists(&mut *conn, order_id).await? {
            return Err(AppError::not_found("Order", order_id));
        }
        self.history_repo.history_for(&mut *conn, order_id).await
    }
}
