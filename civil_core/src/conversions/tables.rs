//! Built-in conversion data.
//!
//! Factors are the published values the converter pages have always used.
//! The `jpy` currency row did not exist upstream and is filled with the
//! reciprocals of the declared `* -> jpy` rates.

use super::operation::{AffineTransform, PercentFn};
use super::registry::{Category, CategoryBuilder, CategoryKind};

pub(crate) fn builtin_categories() -> Vec<Category> {
    vec![
        length(),
        area(),
        volume(),
        weight(),
        temperature(),
        speed(),
        currency(),
        discount(),
    ]
}

fn length() -> Category {
    CategoryBuilder::new("length", "Length", CategoryKind::Measurement)
        .description("Linear distance, metric and US customary.")
        .unit("meter", "Meter")
        .unit("feet", "Feet")
        .unit("inch", "Inch")
        .unit("yard", "Yard")
        .unit("kilometer", "Kilometer")
        .unit("mile", "Mile")
        .scalars(
            "meter",
            &[
                ("feet", 3.28084),
                ("inch", 39.3701),
                ("yard", 1.09361),
                ("kilometer", 0.001),
                ("mile", 0.000621371),
            ],
        )
        .scalars(
            "feet",
            &[
                ("meter", 0.3048),
                ("inch", 12.0),
                ("yard", 0.333333),
                ("kilometer", 0.0003048),
                ("mile", 0.000189394),
            ],
        )
        .scalars(
            "inch",
            &[
                ("meter", 0.0254),
                ("feet", 0.0833333),
                ("yard", 0.0277778),
                ("kilometer", 0.0000254),
                ("mile", 0.0000157828),
            ],
        )
        .scalars(
            "yard",
            &[
                ("meter", 0.9144),
                ("feet", 3.0),
                ("inch", 36.0),
                ("kilometer", 0.0009144),
                ("mile", 0.000568182),
            ],
        )
        .scalars(
            "kilometer",
            &[
                ("meter", 1000.0),
                ("feet", 3280.84),
                ("inch", 39370.1),
                ("yard", 1093.61),
                ("mile", 0.621371),
            ],
        )
        .scalars(
            "mile",
            &[
                ("meter", 1609.34),
                ("feet", 5280.0),
                ("inch", 63360.0),
                ("yard", 1760.0),
                ("kilometer", 1.60934),
            ],
        )
        .build()
}

fn area() -> Category {
    CategoryBuilder::new("area", "Area", CategoryKind::Measurement)
        .description("Floor and land area.")
        .unit("squareMeter", "Square Meter")
        .unit("squareFeet", "Square Feet")
        .unit("acre", "Acre")
        .unit("hectare", "Hectare")
        .scalars(
            "squareMeter",
            &[("squareFeet", 10.7639), ("acre", 0.000247105), ("hectare", 0.0001)],
        )
        .scalars(
            "squareFeet",
            &[("squareMeter", 0.092903), ("acre", 0.0000229568), ("hectare", 0.00000929034)],
        )
        .scalars(
            "acre",
            &[("squareMeter", 4046.86), ("squareFeet", 43560.0), ("hectare", 0.404686)],
        )
        .scalars(
            "hectare",
            &[("squareMeter", 10000.0), ("squareFeet", 107639.0), ("acre", 2.47105)],
        )
        .build()
}

fn volume() -> Category {
    CategoryBuilder::new("volume", "Volume", CategoryKind::Measurement)
        .description("Bulk and liquid volume.")
        .unit("cubicMeter", "Cubic Meter")
        .unit("cubicFeet", "Cubic Feet")
        .unit("liter", "Liter")
        .unit("gallon", "Gallon")
        .scalars(
            "cubicMeter",
            &[("cubicFeet", 35.3147), ("liter", 1000.0), ("gallon", 264.172)],
        )
        .scalars(
            "cubicFeet",
            &[("cubicMeter", 0.0283168), ("liter", 28.3168), ("gallon", 7.48052)],
        )
        .scalars(
            "liter",
            &[("cubicMeter", 0.001), ("cubicFeet", 0.0353147), ("gallon", 0.264172)],
        )
        .scalars(
            "gallon",
            &[("cubicMeter", 0.00378541), ("cubicFeet", 0.133681), ("liter", 3.78541)],
        )
        .build()
}

fn weight() -> Category {
    CategoryBuilder::new("weight", "Weight", CategoryKind::Measurement)
        .description("Mass of materials.")
        .unit("kilogram", "Kilogram")
        .unit("pound", "Pound")
        .unit("gram", "Gram")
        .unit("ton", "Ton")
        .scalars("kilogram", &[("pound", 2.20462), ("gram", 1000.0), ("ton", 0.001)])
        .scalars("pound", &[("kilogram", 0.453592), ("gram", 453.592), ("ton", 0.000453592)])
        .scalars("gram", &[("kilogram", 0.001), ("pound", 0.00220462), ("ton", 0.000001)])
        .scalars("ton", &[("kilogram", 1000.0), ("pound", 2204.62), ("gram", 1000000.0)])
        .build()
}

fn temperature() -> Category {
    CategoryBuilder::new("temperature", "Temperature", CategoryKind::Measurement)
        .description("Temperature scales. Each direction is its own affine edge.")
        .unit("celsius", "Celsius")
        .unit("fahrenheit", "Fahrenheit")
        .unit("kelvin", "Kelvin")
        .affine("celsius", "fahrenheit", AffineTransform::new(0.0, 9.0, 5.0, 32.0))
        .affine("celsius", "kelvin", AffineTransform::offset(273.15))
        .affine("fahrenheit", "celsius", AffineTransform::new(-32.0, 5.0, 9.0, 0.0))
        .affine("fahrenheit", "kelvin", AffineTransform::new(-32.0, 5.0, 9.0, 273.15))
        .affine("kelvin", "celsius", AffineTransform::offset(-273.15))
        .affine("kelvin", "fahrenheit", AffineTransform::new(-273.15, 9.0, 5.0, 32.0))
        .build()
}

fn speed() -> Category {
    CategoryBuilder::new("speed", "Speed", CategoryKind::Measurement)
        .description("Velocity over ground or water.")
        .unit("kilometersPerHour", "Kilometers per Hour")
        .unit("milesPerHour", "Miles per Hour")
        .unit("metersPerSecond", "Meters per Second")
        .unit("knots", "Knots")
        .scalars(
            "kilometersPerHour",
            &[("milesPerHour", 0.621371), ("metersPerSecond", 0.277778), ("knots", 0.539957)],
        )
        .scalars(
            "milesPerHour",
            &[("kilometersPerHour", 1.60934), ("metersPerSecond", 0.44704), ("knots", 0.868976)],
        )
        .scalars(
            "metersPerSecond",
            &[("kilometersPerHour", 3.6), ("milesPerHour", 2.23694), ("knots", 1.94384)],
        )
        .scalars(
            "knots",
            &[("kilometersPerHour", 1.852), ("milesPerHour", 1.15078), ("metersPerSecond", 0.514444)],
        )
        .build()
}

fn currency() -> Category {
    CategoryBuilder::new("currency", "Currency", CategoryKind::Currency)
        .description("Fixed reference exchange rates. Rates are quoted per direction and are not exact reciprocals.")
        .unit("usd", "US Dollar")
        .unit("eur", "Euro")
        .unit("gbp", "British Pound")
        .unit("jpy", "Japanese Yen")
        .unit("npr", "Nepalese Rupee")
        .scalars("usd", &[("eur", 0.91), ("gbp", 0.79), ("jpy", 148.42), ("npr", 132.5)])
        .scalars("eur", &[("usd", 1.1), ("gbp", 0.87), ("jpy", 162.97), ("npr", 145.61)])
        .scalars("gbp", &[("usd", 1.27), ("eur", 1.15), ("jpy", 187.87), ("npr", 167.72)])
        .scalars("jpy", &[("usd", 0.0067376), ("eur", 0.0061361), ("gbp", 0.0053228), ("npr", 0.892857)])
        .scalars("npr", &[("usd", 0.0075), ("eur", 0.0069), ("gbp", 0.006), ("jpy", 1.12)])
        .build()
}

/// Pricing pseudo-category. Only `originalPrice` has outgoing edges; the
/// derived values cannot be converted back.
fn discount() -> Category {
    CategoryBuilder::new("discount", "Discount", CategoryKind::Pricing)
        .description("Price after a percentage discount, and the amount saved.")
        .auxiliary("discount_percent", "Discount (%)", PercentFn::DEFAULT_PERCENT)
        .unit("originalPrice", "Original Price")
        .unit("discountedPrice", "Discounted Price")
        .unit("savingAmount", "Saving Amount")
        .percent("originalPrice", "discountedPrice", PercentFn::DiscountedPrice)
        .percent("originalPrice", "savingAmount", PercentFn::SavingAmount)
        .build()
}
