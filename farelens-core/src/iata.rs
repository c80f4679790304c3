//! IATA carrier reference data for display.

/// Display name for a two-letter marketing carrier code.
///
/// Covers the carriers the result list shows most often; anything else
/// falls back to the raw code at the call site.
pub fn airline_name(carrier_code: &str) -> Option<&'static str> {
    match carrier_code {
        "AA" => Some("American Airlines"),
        "DL" => Some("Delta Air Lines"),
        "UA" => Some("United Airlines"),
        "BA" => Some("British Airways"),
        "LH" => Some("Lufthansa"),
        "AF" => Some("Air France"),
        "KL" => Some("KLM Royal Dutch Airlines"),
        "SQ" => Some("Singapore Airlines"),
        "NH" => Some("All Nippon Airways"),
        "CX" => Some("Cathay Pacific"),
        "WN" => Some("Southwest Airlines"),
        "AS" => Some("Alaska Airlines"),
        "B6" => Some("JetBlue Airways"),
        "NK" => Some("Spirit Airlines"),
        "F9" => Some("Frontier Airlines"),
        _ => None,
    }
}

/// Display label for a carrier: the airline name when known, else the code.
pub fn airline_label(carrier_code: &str) -> &str {
    airline_name(carrier_code).unwrap_or(carrier_code)
}
