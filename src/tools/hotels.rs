//! Hotel search and booking tools.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

use super::{ToolDefinition, ToolError};
use crate::store::HotelStore;

/// Arguments of `searchHotels`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHotelsArgs {
    pub city: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub max_price: f64,
    #[serde(default)]
    pub check_in_date: Option<String>,
}

/// Arguments of `bookHotel`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHotelArgs {
    pub hotel_id: String,
    pub user_id: String,
    pub check_in_date: String,
    pub check_out_date: String,
}

pub(super) fn search_definition() -> ToolDefinition {
    ToolDefinition {
        name: "searchHotels",
        description: "Search for available hotels in a city within a price range. Optionally filter by check-in date.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name to search for hotels"
                },
                "maxPrice": {
                    "type": "number",
                    "description": "Maximum price per night in USD"
                },
                "checkInDate": {
                    "type": "string",
                    "description": "Optional check-in date in YYYY-MM-DD format"
                }
            },
            "required": ["city", "maxPrice"]
        }),
    }
}

pub(super) fn book_definition() -> ToolDefinition {
    ToolDefinition {
        name: "bookHotel",
        description: "Book a hotel for a user. Returns a booking confirmation with total price.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "hotelId": {
                    "type": "string",
                    "description": "ID of the hotel to book"
                },
                "userId": {
                    "type": "string",
                    "description": "ID of the user making the booking"
                },
                "checkInDate": {
                    "type": "string",
                    "description": "Check-in date in YYYY-MM-DD format"
                },
                "checkOutDate": {
                    "type": "string",
                    "description": "Check-out date in YYYY-MM-DD format"
                }
            },
            "required": ["hotelId", "userId", "checkInDate", "checkOutDate"]
        }),
    }
}

pub(super) fn search_hotels(
    store: &HotelStore,
    args: SearchHotelsArgs,
) -> Result<Value, ToolError> {
    let matches = store.search(&args.city, args.max_price, args.check_in_date.as_deref());
    Ok(serde_json::to_value(matches)?)
}

pub(super) async fn book_hotel(
    store: &HotelStore,
    args: BookHotelArgs,
) -> Result<Value, ToolError> {
    let confirmation = store
        .book(
            &args.hotel_id,
            &args.user_id,
            &args.check_in_date,
            &args.check_out_date,
        )
        .await?;
    Ok(serde_json::to_value(confirmation)?)
}

/// Models sometimes quote numbers; accept `"150"` as well as `150`.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got \"{}\"", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_args_accept_quoted_price() {
        let args: SearchHotelsArgs =
            serde_json::from_str(r#"{"city":"Vancouver","maxPrice":"150"}"#).expect("decodes");
        assert_eq!(args.max_price, 150.0);
        assert_eq!(args.check_in_date, None);
    }

    #[test]
    fn search_args_reject_non_numeric_price() {
        let err = serde_json::from_str::<SearchHotelsArgs>(
            r#"{"city":"Vancouver","maxPrice":"cheap"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn book_args_require_every_field() {
        let err = serde_json::from_str::<BookHotelArgs>(
            r#"{"hotelId":"hotel-1","userId":"u1","checkInDate":"2026-02-01"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("checkOutDate"));
    }

    #[test]
    fn schemas_list_required_fields() {
        assert_eq!(
            search_definition().input_schema["required"],
            json!(["city", "maxPrice"])
        );
        assert_eq!(
            book_definition().input_schema["required"],
            json!(["hotelId", "userId", "checkInDate", "checkOutDate"])
        );
    }
}
