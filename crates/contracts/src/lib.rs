//! Общие контракты консоли: конфигурация источников данных, записи товаров
//! и запросы/ответы синхронизации.

pub mod domain;
pub mod shared;
pub mod usecases;
