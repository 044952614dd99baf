//! Formatting of monetary amounts for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as dollars with two decimal places and thousands separators,
/// e.g. `-1234.5` becomes "-$1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("'$' is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .expect("'-$' is a valid currency prefix")
            .precision(Precision::Decimals(2))
    });

    let mut formatted = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // numfmt renders zero as "0"
        return "$0.00".to_owned();
    };

    // Whole amounts have no decimal point and "12.30" comes out as "12.3".
    match formatted.rfind('.') {
        None => formatted.push_str(".00"),
        Some(point) if formatted.len() - point == 2 => formatted.push('0'),
        Some(_) => {}
    }

    formatted
}
