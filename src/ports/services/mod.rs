mod object_service;

pub use object_service::ObjectService;
