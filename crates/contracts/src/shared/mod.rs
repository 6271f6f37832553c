pub mod product_record;
