//! Session domain: model, persistence trait, and the observable store.

mod model;
mod repository;
mod store;

pub use model::Session;
pub use repository::SessionSnapshotRepository;
pub use store::SessionStore;
