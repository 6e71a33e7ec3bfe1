#![forbid(unsafe_code)]

mod convert;
mod dto;
mod errors;
pub mod params;

pub use convert::{replace_result_dto, search_result_dto, validation_result_dto};
pub use dto::{
    OrgSummaryDto, ReplacePairRequest, ReplaceResultDto, SearchResultDto, ValidationResultDto,
};
pub use errors::ApiError;

pub const CRATE_NAME: &str = "netswap-api";
