//! Built-in currency catalog: ISO 4217 code to display name and sign.
//!
//! Add-currency validates codes against this table and falls back to the
//! catalog name when the request omits one.

/// Look up a currency code (already upper-cased) in the catalog.
pub fn lookup(code: &str) -> Option<(&'static str, &'static str)> {
    CATALOG
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, sign)| (*name, *sign))
}

const CATALOG: &[(&str, &str, &str)] = &[
    ("USD", "United States Dollar", "$"),
    ("EUR", "Euro", "\u{20ac}"),
    ("GBP", "Pound Sterling", "\u{a3}"),
    ("JPY", "Japanese Yen", "\u{a5}"),
    ("CNY", "Chinese Yuan", "\u{a5}"),
    ("CHF", "Swiss Franc", "Fr"),
    ("RUB", "Russian Ruble", "\u{20bd}"),
    ("AUD", "Australian Dollar", "A$"),
    ("CAD", "Canadian Dollar", "C$"),
    ("NZD", "New Zealand Dollar", "NZ$"),
    ("SEK", "Swedish Krona", "kr"),
    ("NOK", "Norwegian Krone", "kr"),
    ("DKK", "Danish Krone", "kr"),
    ("PLN", "Polish Zloty", "z\u{142}"),
    ("CZK", "Czech Koruna", "K\u{10d}"),
    ("HUF", "Hungarian Forint", "Ft"),
    ("TRY", "Turkish Lira", "\u{20ba}"),
    ("INR", "Indian Rupee", "\u{20b9}"),
    ("BRL", "Brazilian Real", "R$"),
    ("KRW", "South Korean Won", "\u{20a9}"),
    ("MXN", "Mexican Peso", "$"),
    ("ZAR", "South African Rand", "R"),
    ("HKD", "Hong Kong Dollar", "HK$"),
    ("SGD", "Singapore Dollar", "S$"),
    ("ILS", "Israeli New Shekel", "\u{20aa}"),
    ("UAH", "Ukrainian Hryvnia", "\u{20b4}"),
    ("THB", "Thai Baht", "\u{e3f}"),
    ("IDR", "Indonesian Rupiah", "Rp"),
    ("KZT", "Kazakhstani Tenge", "\u{20b8}"),
    ("AMD", "Armenian Dram", "\u{58f}"),
    ("GEL", "Georgian Lari", "\u{20be}"),
    ("BYN", "Belarusian Ruble", "Br"),
    ("AED", "United Arab Emirates Dirham", "DH"),
];
