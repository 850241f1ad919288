pub mod departure;
pub mod formatting;
pub mod input;
pub mod map_scene;
pub mod planner;
pub mod request_builder;
pub mod response_parser;
pub mod results_board;
pub mod route_fetch;
pub mod route_result;
pub mod run_state;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_utils;
