pub mod upload_routes;
