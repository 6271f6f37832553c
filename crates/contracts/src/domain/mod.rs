pub mod a001_data_source;
