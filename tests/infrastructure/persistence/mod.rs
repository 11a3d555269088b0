mod csv_caption_log_test;
mod npy_feature_store_test;
