pub mod manager;
pub mod models;
pub mod repository;
pub mod scope;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{
    AdminRepository, ClientRepository, EntityRepository, IntoColumns, ScopedRepository,
    SingletonRepository, Sluggable, TenantRecord,
};
