mod generate_test;
mod model_test;
