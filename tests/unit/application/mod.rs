mod test_config;
mod test_product_service;
