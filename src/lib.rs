mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod startup;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, utils};

use repositories::store::Store;
use use_cases::{associations::SkillAssociationHandler, skills::SkillHandler, users::UserHandler};

pub struct AppState<S: Store> {
    pub user_handler: UserHandler<S>,
    pub skill_handler: SkillHandler<S>,
    pub association_handler: SkillAssociationHandler<S>,
    pub store: S,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        AppState {
            user_handler: UserHandler::new(store.clone()),
            skill_handler: SkillHandler::new(store.clone()),
            association_handler: SkillAssociationHandler::new(store.clone()),
            store,
        }
    }
}
