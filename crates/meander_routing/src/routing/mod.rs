pub mod dijkstra;
pub mod route_result;
pub mod routing_path_builder;
pub mod routing_request;
pub mod shortest_path_algorithm;
