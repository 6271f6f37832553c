//! Клиентское ядро консоли: выбор источника данных, сборка конфигурации,
//! разбор загруженных файлов и отправка синхронизации на backend.

pub mod shared;
pub mod system;
pub mod usecases;
