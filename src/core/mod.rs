pub mod departments;
pub mod employees;
pub mod store;

pub use crate::domain::model::{Department, Employee, EmployeeRecord};
pub use crate::domain::ports::{ConfigProvider, RemoteCollection, Resource};
pub use crate::utils::error::Result;
pub use store::{CollectionStore, Collections};
