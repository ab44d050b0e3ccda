mod object_service_impl;

pub use object_service_impl::ObjectServiceImpl;
