pub mod conversion_log;
