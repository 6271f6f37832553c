pub mod aggregate;
pub mod connector;

pub use aggregate::{
    AuthType, DatabaseType, FileFormat, SourceConfig, SourceSettings, SourceType, SyncInterval,
    SyncSchedule,
};
pub use connector::{ConnectorDefinition, CONNECTORS};
