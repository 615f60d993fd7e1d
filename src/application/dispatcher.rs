//! Session dispatcher.
//!
//! The single entry point for the chat transport: takes one decoded user
//! action, validates it against the session's conversation state, performs
//! at most one cart mutation, and answers with the next state plus a render
//! instruction.
//!
//! State only advances after the triggering I/O succeeded. On upstream
//! failure the persisted session stays where it was and the reply carries
//! the failed action back as a retry affordance.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::foundation::{ShopError, UserId};
use crate::domain::session::{ConversationState, RenderInstruction, Session, UserAction};
use crate::ports::{CartStore, CatalogClient, SessionStore};

use super::ReconciliationEngine;

/// Outcome of one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// The session's conversation state after this action.
    pub state: ConversationState,
    /// What the transport should present.
    pub render: RenderInstruction,
}

/// Routes inbound user actions through the state machine and the
/// reconciliation engine.
///
/// All collaborators are injected at construction; there is no ambient
/// state.
pub struct Dispatcher {
    catalog: Arc<dyn CatalogClient>,
    sessions: Arc<dyn SessionStore>,
    engine: ReconciliationEngine,
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        sessions: Arc<dyn SessionStore>,
        cart_store: Arc<dyn CartStore>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            engine: ReconciliationEngine::new(cart_store),
        }
    }

    /// Handles one user action.
    ///
    /// Resolves the user's session (creating one on first interaction),
    /// dispatches, and maps every downstream failure into a renderable
    /// error reply: upstream outages carry the action back for retry,
    /// validation failures re-prompt, invariant violations are logged and
    /// surfaced generically.
    ///
    /// # Errors
    ///
    /// Only fails if the session store itself is unreachable; everything
    /// past session resolution is reported inside the `Reply`.
    pub async fn handle_action(
        &self,
        user_id: &UserId,
        action: UserAction,
    ) -> Result<Reply, ShopError> {
        let mut session = match self.sessions.load(user_id).await? {
            Some(session) => session,
            None => {
                debug!(user_id = %user_id, "creating session on first interaction");
                Session::new(user_id.clone())
            }
        };

        let state_before = session.state();
        match self.dispatch(&mut session, action.clone()).await {
            Ok(reply) => Ok(reply),
            // The local session copy is discarded here, so a half-applied
            // transition never reaches the store.
            Err(err) => Ok(Self::failure_reply(state_before, action, err)),
        }
    }

    async fn dispatch(
        &self,
        session: &mut Session,
        action: UserAction,
    ) -> Result<Reply, ShopError> {
        use ConversationState::*;

        match action {
            UserAction::ShowMenu => self.show_menu(session).await,

            UserAction::SelectProduct { product_id } => {
                if session.state() != BrowsingMenu {
                    return self.reprompt(session).await;
                }
                let product = self.catalog.get_product(&product_id).await?;
                session.set_viewing_product(product_id);
                session.transition(ViewingProduct)?;
                self.sessions.save(session).await?;
                Ok(Reply {
                    state: session.state(),
                    render: RenderInstruction::ShowProductDetail { product },
                })
            }

            UserAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if session.state() != ViewingProduct {
                    return self.reprompt(session).await;
                }
                let product = self.catalog.get_product(&product_id).await?;
                let mut cart = self.engine.get_or_create_cart(session.user_id()).await?;
                self.engine.add_item(&mut cart, &product, quantity).await?;
                // Stays on the product screen; the user decides when to
                // open the cart.
                session.transition(ViewingProduct)?;
                self.sessions.save(session).await?;
                Ok(Reply {
                    state: session.state(),
                    render: RenderInstruction::ShowProductDetail { product },
                })
            }

            UserAction::ViewCart => {
                if !matches!(session.state(), ViewingProduct | ViewingCart) {
                    return self.reprompt(session).await;
                }
                let cart = self.engine.get_or_create_cart(session.user_id()).await?;
                session.transition(ViewingCart)?;
                self.sessions.save(session).await?;
                Ok(Reply {
                    state: session.state(),
                    render: RenderInstruction::ShowCartSummary {
                        summary: cart.summary(),
                    },
                })
            }

            UserAction::RemoveLine { line_id } => {
                if session.state() != ViewingCart {
                    return self.reprompt(session).await;
                }
                let mut cart = self.engine.get_or_create_cart(session.user_id()).await?;
                match self.engine.remove_item(&mut cart, &line_id).await {
                    Ok(()) => {}
                    Err(ShopError::NotFound { .. }) => {
                        // Already gone, likely a stale button. Re-render the
                        // freshly fetched cart to resynchronize.
                        debug!(line_id = %line_id, "removing absent line, re-rendering cart");
                    }
                    Err(err) => return Err(err),
                }
                session.transition(ViewingCart)?;
                self.sessions.save(session).await?;
                Ok(Reply {
                    state: session.state(),
                    render: RenderInstruction::ShowCartSummary {
                        summary: cart.summary(),
                    },
                })
            }

            UserAction::Checkout => {
                if session.state() != ViewingCart {
                    return self.reprompt(session).await;
                }
                session.transition(AwaitingEmail)?;
                self.sessions.save(session).await?;
                Ok(Reply {
                    state: session.state(),
                    render: RenderInstruction::PromptForEmail,
                })
            }

            UserAction::SubmitEmail { input } | UserAction::FreeText { input } => {
                if session.state() != AwaitingEmail {
                    return self.reprompt(session).await;
                }
                self.submit_email(session, &input).await
            }
        }
    }

    /// "Show menu" is the reset transition, legal from every state.
    async fn show_menu(&self, session: &mut Session) -> Result<Reply, ShopError> {
        let products = self.catalog.list_products().await?;
        session.transition(ConversationState::BrowsingMenu)?;
        self.sessions.save(session).await?;
        Ok(Reply {
            state: session.state(),
            render: RenderInstruction::ShowProductList { products },
        })
    }

    async fn submit_email(&self, session: &mut Session, input: &str) -> Result<Reply, ShopError> {
        let mut cart = self.engine.get_or_create_cart(session.user_id()).await?;
        match self.engine.set_checkout_email(&mut cart, input).await {
            Ok(email) => {
                debug!(cart_id = %cart.id(), email = %email, "checkout email captured");
                session.transition(ConversationState::BrowsingMenu)?;
                self.sessions.save(session).await?;
                // The email is committed either way; if the menu fetch
                // fails the user just retries the menu.
                match self.catalog.list_products().await {
                    Ok(products) => Ok(Reply {
                        state: session.state(),
                        render: RenderInstruction::ShowProductList { products },
                    }),
                    Err(err) => Ok(Reply {
                        state: session.state(),
                        render: RenderInstruction::ShowError {
                            message: err.to_string(),
                            retry: Some(UserAction::ShowMenu),
                        },
                    }),
                }
            }
            Err(ShopError::Validation(err)) => Ok(Reply {
                // Stay on the prompt; no retry affordance, the user simply
                // types a corrected address.
                state: session.state(),
                render: RenderInstruction::ShowError {
                    message: err.to_string(),
                    retry: None,
                },
            }),
            Err(err) => Err(err),
        }
    }

    /// An input that is illegal for the current state re-displays the
    /// state's prompt. Never a crash, never a silent drop.
    async fn reprompt(&self, session: &Session) -> Result<Reply, ShopError> {
        use ConversationState::*;

        let render = match session.state() {
            Idle | BrowsingMenu => {
                let products = self.catalog.list_products().await?;
                RenderInstruction::ShowProductList { products }
            }
            ViewingProduct => match session.viewing_product() {
                Some(product_id) => {
                    let product = self.catalog.get_product(product_id).await?;
                    RenderInstruction::ShowProductDetail { product }
                }
                // Scratch data lost (e.g. store round-trip from an older
                // version); fall back to the menu view without changing state.
                None => {
                    let products = self.catalog.list_products().await?;
                    RenderInstruction::ShowProductList { products }
                }
            },
            ViewingCart => {
                let cart = self.engine.get_or_create_cart(session.user_id()).await?;
                RenderInstruction::ShowCartSummary {
                    summary: cart.summary(),
                }
            }
            AwaitingEmail => RenderInstruction::PromptForEmail,
        };

        Ok(Reply {
            state: session.state(),
            render,
        })
    }

    fn failure_reply(state: ConversationState, action: UserAction, err: ShopError) -> Reply {
        let render = match &err {
            ShopError::InvariantViolation(reason) => {
                error!(reason = %reason, "cart store invariant violation");
                RenderInstruction::ShowError {
                    message: "Something is wrong with your cart. Please try again later."
                        .to_string(),
                    retry: None,
                }
            }
            _ if err.is_retryable() => {
                warn!(error = %err, "upstream failure, offering retry");
                RenderInstruction::ShowError {
                    message: err.to_string(),
                    retry: Some(action),
                }
            }
            _ => RenderInstruction::ShowError {
                message: err.to_string(),
                retry: None,
            },
        };
        Reply { state, render }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Cart;
    use crate::domain::catalog::{Product, ProductSummary};
    use crate::domain::foundation::{
        CartId, EmailAddress, LineId, ProductId, Quantity, Upstream,
    };
    use crate::ports::NewCartLine;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeCatalog {
        products: Vec<Product>,
        fail: AtomicBool,
    }

    impl FakeCatalog {
        fn with_fish() -> Self {
            Self {
                products: vec![
                    Product::new(
                        ProductId::new("fish-1").unwrap(),
                        "Mackerel".to_string(),
                        "Fresh North Sea mackerel".to_string(),
                        dec!(4.20),
                        vec![1, 2, 3],
                    ),
                    Product::new(
                        ProductId::new("fish-2").unwrap(),
                        "Herring".to_string(),
                        "Baltic herring".to_string(),
                        dec!(2.10),
                        vec![4, 5],
                    ),
                ],
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl CatalogClient for FakeCatalog {
        async fn list_products(&self) -> Result<Vec<ProductSummary>, ShopError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopError::unavailable(Upstream::Catalog, "down"));
            }
            Ok(self
                .products
                .iter()
                .map(|p| ProductSummary {
                    id: p.id().clone(),
                    title: p.title().to_string(),
                })
                .collect())
        }

        async fn get_product(&self, id: &ProductId) -> Result<Product, ShopError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(ShopError::unavailable(Upstream::Catalog, "down"));
            }
            self.products
                .iter()
                .find(|p| p.id() == id)
                .cloned()
                .ok_or_else(|| ShopError::not_found("product", id.as_str()))
        }
    }

    #[derive(Default)]
    struct FakeSessionStore {
        sessions: Mutex<HashMap<String, Session>>,
    }

    impl FakeSessionStore {
        fn stored_state(&self, user: &str) -> Option<ConversationState> {
            self.sessions.lock().unwrap().get(user).map(Session::state)
        }
    }

    #[async_trait]
    impl SessionStore for FakeSessionStore {
        async fn load(&self, user_id: &UserId) -> Result<Option<Session>, ShopError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .get(user_id.as_str())
                .cloned())
        }

        async fn save(&self, session: &Session) -> Result<(), ShopError> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.user_id().as_str().to_string(), session.clone());
            Ok(())
        }
    }

    type StoredLine = (LineId, ProductId, Quantity, Decimal, String);

    /// A functional cart store: one cart per user, lines kept as raw data
    /// and reconstituted on every read, like the remote store would.
    #[derive(Default)]
    struct FakeCartStore {
        carts: Mutex<HashMap<String, (CartId, Vec<StoredLine>, Option<EmailAddress>)>>,
        next_id: AtomicUsize,
        fail: AtomicBool,
        mutations: AtomicUsize,
    }

    impl FakeCartStore {
        fn set_failing(&self, failing: bool) {
            self.fail.store(failing, Ordering::SeqCst);
        }

        fn mutation_count(&self) -> usize {
            self.mutations.load(Ordering::SeqCst)
        }

        fn check(&self) -> Result<(), ShopError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(ShopError::unavailable(Upstream::CartStore, "down"))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CartStore for FakeCartStore {
        async fn find_cart_by_user(&self, user_id: &UserId) -> Result<Option<Cart>, ShopError> {
            self.check()?;
            let carts = self.carts.lock().unwrap();
            let Some((cart_id, lines, email)) = carts.get(user_id.as_str()) else {
                return Ok(None);
            };
            let lines = lines
                .iter()
                .map(|(id, product_id, quantity, price, title)| {
                    crate::domain::cart::CartLine::new(
                        id.clone(),
                        product_id.clone(),
                        *quantity,
                        *price,
                        title.clone(),
                    )
                })
                .collect();
            Cart::from_lines(cart_id.clone(), user_id.clone(), lines, email.clone()).map(Some)
        }

        async fn create_cart(&self, user_id: &UserId) -> Result<Cart, ShopError> {
            self.check()?;
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let cart_id = CartId::new(format!("cart-{}", n)).unwrap();
            self.carts.lock().unwrap().insert(
                user_id.as_str().to_string(),
                (cart_id.clone(), Vec::new(), None),
            );
            Ok(Cart::empty(cart_id, user_id.clone()))
        }

        async fn insert_line(
            &self,
            cart_id: &CartId,
            line: &NewCartLine,
        ) -> Result<LineId, ShopError> {
            self.check()?;
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let line_id = LineId::new(format!("line-{}", n)).unwrap();
            let mut carts = self.carts.lock().unwrap();
            let entry = carts
                .values_mut()
                .find(|(id, _, _)| id == cart_id)
                .ok_or_else(|| ShopError::not_found("cart", cart_id.as_str()))?;
            entry.1.push((
                line_id.clone(),
                line.product_id.clone(),
                line.quantity,
                line.unit_price,
                line.title.clone(),
            ));
            Ok(line_id)
        }

        async fn update_line_quantity(
            &self,
            line_id: &LineId,
            _cart_id: &CartId,
            _product_id: &ProductId,
            quantity: Quantity,
        ) -> Result<(), ShopError> {
            self.check()?;
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let mut carts = self.carts.lock().unwrap();
            for (_, lines, _) in carts.values_mut() {
                if let Some(line) = lines.iter_mut().find(|(id, ..)| id == line_id) {
                    line.2 = quantity;
                    return Ok(());
                }
            }
            Err(ShopError::not_found("cart line", line_id.as_str()))
        }

        async fn delete_line(&self, line_id: &LineId) -> Result<(), ShopError> {
            self.check()?;
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let mut carts = self.carts.lock().unwrap();
            for (_, lines, _) in carts.values_mut() {
                if let Some(pos) = lines.iter().position(|(id, ..)| id == line_id) {
                    lines.remove(pos);
                    return Ok(());
                }
            }
            Err(ShopError::not_found("cart line", line_id.as_str()))
        }

        async fn set_email(&self, cart_id: &CartId, email: &EmailAddress) -> Result<(), ShopError> {
            self.check()?;
            self.mutations.fetch_add(1, Ordering::SeqCst);
            let mut carts = self.carts.lock().unwrap();
            let entry = carts
                .values_mut()
                .find(|(id, _, _)| id == cart_id)
                .ok_or_else(|| ShopError::not_found("cart", cart_id.as_str()))?;
            entry.2 = Some(email.clone());
            Ok(())
        }
    }

    struct Harness {
        dispatcher: Dispatcher,
        catalog: Arc<FakeCatalog>,
        sessions: Arc<FakeSessionStore>,
        carts: Arc<FakeCartStore>,
        user: UserId,
    }

    fn harness() -> Harness {
        let catalog = Arc::new(FakeCatalog::with_fish());
        let sessions = Arc::new(FakeSessionStore::default());
        let carts = Arc::new(FakeCartStore::default());
        let dispatcher = Dispatcher::new(catalog.clone(), sessions.clone(), carts.clone());
        Harness {
            dispatcher,
            catalog,
            sessions,
            carts,
            user: UserId::new("user-1").unwrap(),
        }
    }

    impl Harness {
        async fn act(&self, action: UserAction) -> Reply {
            self.dispatcher
                .handle_action(&self.user, action)
                .await
                .unwrap()
        }

        /// Drive the session to `ViewingProduct` on fish-1.
        async fn goto_product(&self) {
            self.act(UserAction::ShowMenu).await;
            self.act(UserAction::SelectProduct {
                product_id: ProductId::new("fish-1").unwrap(),
            })
            .await;
        }

        /// Drive the session to `ViewingCart` with fish-1 x2 in the cart.
        async fn goto_cart(&self) {
            self.goto_product().await;
            self.act(UserAction::SetQuantity {
                product_id: ProductId::new("fish-1").unwrap(),
                quantity: Quantity::new(dec!(2)).unwrap(),
            })
            .await;
            self.act(UserAction::ViewCart).await;
        }
    }

    #[tokio::test]
    async fn first_action_creates_session_and_shows_menu() {
        let h = harness();
        let reply = h.act(UserAction::ShowMenu).await;

        assert_eq!(reply.state, ConversationState::BrowsingMenu);
        assert!(matches!(
            reply.render,
            RenderInstruction::ShowProductList { ref products } if products.len() == 2
        ));
        assert_eq!(
            h.sessions.stored_state("user-1"),
            Some(ConversationState::BrowsingMenu)
        );
    }

    #[tokio::test]
    async fn selecting_a_product_shows_detail_with_image() {
        let h = harness();
        h.act(UserAction::ShowMenu).await;
        let reply = h
            .act(UserAction::SelectProduct {
                product_id: ProductId::new("fish-1").unwrap(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::ViewingProduct);
        match reply.render {
            RenderInstruction::ShowProductDetail { product } => {
                assert_eq!(product.title(), "Mackerel");
                assert_eq!(product.image(), &[1, 2, 3]);
            }
            other => panic!("expected product detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn checkout_from_menu_reprompts_without_state_change() {
        let h = harness();
        h.act(UserAction::ShowMenu).await;
        let reply = h.act(UserAction::Checkout).await;

        assert_eq!(reply.state, ConversationState::BrowsingMenu);
        assert!(matches!(
            reply.render,
            RenderInstruction::ShowProductList { .. }
        ));
        assert_eq!(
            h.sessions.stored_state("user-1"),
            Some(ConversationState::BrowsingMenu)
        );
    }

    #[tokio::test]
    async fn set_quantity_adds_to_cart_and_stays_on_product() {
        let h = harness();
        h.goto_product().await;
        let reply = h
            .act(UserAction::SetQuantity {
                product_id: ProductId::new("fish-1").unwrap(),
                quantity: Quantity::new(dec!(2.5)).unwrap(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::ViewingProduct);
        assert_eq!(h.carts.mutation_count(), 1);

        let cart_reply = h.act(UserAction::ViewCart).await;
        match cart_reply.render {
            RenderInstruction::ShowCartSummary { summary } => {
                assert_eq!(summary.lines.len(), 1);
                assert_eq!(summary.total, dec!(10.50));
            }
            other => panic!("expected cart summary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn upstream_failure_during_add_keeps_state_and_offers_retry() {
        let h = harness();
        h.goto_product().await;
        h.carts.set_failing(true);

        let action = UserAction::SetQuantity {
            product_id: ProductId::new("fish-1").unwrap(),
            quantity: Quantity::new(dec!(5)).unwrap(),
        };
        let reply = h.act(action.clone()).await;

        assert_eq!(reply.state, ConversationState::ViewingProduct);
        match reply.render {
            RenderInstruction::ShowError { retry, .. } => assert_eq!(retry, Some(action.clone())),
            other => panic!("expected error with retry, got {:?}", other),
        }
        assert_eq!(
            h.sessions.stored_state("user-1"),
            Some(ConversationState::ViewingProduct)
        );

        // The retry succeeds once the store is back.
        h.carts.set_failing(false);
        let reply = h.act(action).await;
        assert_eq!(reply.state, ConversationState::ViewingProduct);
        assert_eq!(h.carts.mutation_count(), 1);
    }

    #[tokio::test]
    async fn invalid_email_reprompts_in_place() {
        let h = harness();
        h.goto_cart().await;
        h.act(UserAction::Checkout).await;

        let reply = h
            .act(UserAction::SubmitEmail {
                input: "a@b".to_string(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::AwaitingEmail);
        match reply.render {
            RenderInstruction::ShowError { retry, .. } => assert!(retry.is_none()),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(
            h.sessions.stored_state("user-1"),
            Some(ConversationState::AwaitingEmail)
        );
    }

    #[tokio::test]
    async fn valid_email_completes_checkout_and_returns_to_menu() {
        let h = harness();
        h.goto_cart().await;
        h.act(UserAction::Checkout).await;

        let reply = h
            .act(UserAction::SubmitEmail {
                input: "user@example.com".to_string(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::BrowsingMenu);
        assert!(matches!(
            reply.render,
            RenderInstruction::ShowProductList { .. }
        ));
    }

    #[tokio::test]
    async fn free_text_is_treated_as_email_while_awaiting() {
        let h = harness();
        h.goto_cart().await;
        h.act(UserAction::Checkout).await;

        let reply = h
            .act(UserAction::FreeText {
                input: "user@example.com".to_string(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::BrowsingMenu);
    }

    #[tokio::test]
    async fn free_text_elsewhere_reprompts_current_state() {
        let h = harness();
        h.goto_product().await;

        let reply = h
            .act(UserAction::FreeText {
                input: "hello".to_string(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::ViewingProduct);
        assert!(matches!(
            reply.render,
            RenderInstruction::ShowProductDetail { .. }
        ));
    }

    #[tokio::test]
    async fn removing_missing_line_rerenders_cart() {
        let h = harness();
        h.goto_cart().await;

        let reply = h
            .act(UserAction::RemoveLine {
                line_id: LineId::new("line-missing").unwrap(),
            })
            .await;

        assert_eq!(reply.state, ConversationState::ViewingCart);
        match reply.render {
            RenderInstruction::ShowCartSummary { summary } => {
                // Cart untouched by the failed removal.
                assert_eq!(summary.lines.len(), 1);
            }
            other => panic!("expected cart summary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn removing_existing_line_empties_cart() {
        let h = harness();
        h.goto_cart().await;
        let line_id = {
            let carts = h.carts.carts.lock().unwrap();
            carts.get("user-1").unwrap().1[0].0.clone()
        };

        let reply = h.act(UserAction::RemoveLine { line_id }).await;

        match reply.render {
            RenderInstruction::ShowCartSummary { summary } => {
                assert!(summary.lines.is_empty());
                assert_eq!(summary.total, Decimal::ZERO);
            }
            other => panic!("expected cart summary, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn catalog_outage_on_menu_offers_retry() {
        let h = harness();
        h.catalog.fail.store(true, Ordering::SeqCst);

        let reply = h.act(UserAction::ShowMenu).await;

        assert_eq!(reply.state, ConversationState::Idle);
        match reply.render {
            RenderInstruction::ShowError { retry, .. } => {
                assert_eq!(retry, Some(UserAction::ShowMenu));
            }
            other => panic!("expected error with retry, got {:?}", other),
        }
    }
}
