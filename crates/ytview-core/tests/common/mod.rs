pub mod progress_server;
