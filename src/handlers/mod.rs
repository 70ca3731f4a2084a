pub mod email_handler;
