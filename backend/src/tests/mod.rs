pub mod common;

mod favorite_service_test;
mod recommendation_service_test;
