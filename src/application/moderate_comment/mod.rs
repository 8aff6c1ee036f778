pub mod dto;
pub mod host_protocol;
pub mod use_case;
