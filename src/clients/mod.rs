mod product_client;

pub use product_client::ProductClient;
