pub mod reload_handler;
