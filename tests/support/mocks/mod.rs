// tests/support/mocks/mod.rs
pub mod notifier;
pub mod renderer;
pub mod security;
pub mod store;
pub mod time;

pub use notifier::CapturingNotifier;
pub use renderer::FailingRenderer;
pub use security::{StrictPasswordHasher, TestTokenManager, actor_for, token_for};
pub use store::InMemoryStore;
pub use time::{SteppingClock, fixed_now};
