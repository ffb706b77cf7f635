// ABOUTME: Core normalization library for marquee.
// ABOUTME: Provides value coercion, the dataset schema table, typed dataset records, and the row parser.

pub mod coerce;
pub mod error;
pub mod models;
pub mod parser;
pub mod schema;

pub use coerce::{
    get_denomination, is_bool, is_datetime, is_float, is_int, is_money_string,
    replace_sentinels, split_list, to_bool, to_datetime, to_float, to_int, to_opt_bool,
    to_opt_datetime, trim_money_string, Currency, RawField, SENTINEL,
};
pub use error::{CoerceError, DatasetError};
pub use models::{
    parse_characters, DatasetRecord, NameBasics, TitleAkas, TitleBasics, TitleCrew,
    TitleEpisode, TitlePrincipalCrew, TitleRating,
};
pub use parser::{parse_line, Compression, DatasetParser, DatasetParserBuilder, Rows};
pub use schema::{Dataset, UnknownDataset};
