//! Built-in quick-search catalog: every tool page a user can jump to.

use once_cell::sync::Lazy;

use super::SearchEntry;

/// The built-in catalog, in menu order.
pub static CATALOG: Lazy<Vec<SearchEntry>> = Lazy::new(|| {
    [
        ("Calculators", "/calculator", "Smart construction calculators for engineering needs"),
        ("Estimator", "/calculator/estimator", "Calculate construction estimates"),
        (
            "Concrete Calculator",
            "/calculator/estimator/concrete",
            "Calculate concrete volume for foundations, slabs, and columns",
        ),
        (
            "Tile Calculator",
            "/calculator/estimator/tile",
            "Estimate tile quantities for flooring and wall coverage",
        ),
        (
            "Brick Calculator",
            "/calculator/estimator/brick",
            "Calculate brick quantities for walls and structures",
        ),
        ("Converter", "/converter", "Convert units easily"),
        ("Length Converter", "/converter/length", "Meters, feet, inches, yards, kilometers and miles"),
        ("Area Converter", "/converter/area", "Square meters, square feet, acres and hectares"),
        ("Volume Converter", "/converter/volume", "Cubic meters, cubic feet, liters and gallons"),
        ("Weight Converter", "/converter/weight", "Kilograms, pounds, grams and tons"),
        ("Temperature Converter", "/converter/temperature", "Celsius, Fahrenheit and Kelvin"),
        ("Speed Converter", "/converter/speed", "Kilometers per hour, miles per hour, meters per second and knots"),
        ("Currency Converter", "/converter/currency", "USD, EUR, GBP, JPY and NPR exchange"),
        ("Discount Calculator", "/converter/discount", "Discounted price and saving amount from a percentage"),
        ("About", "/about", "Discover how Civil Pro can help your projects"),
    ]
    .into_iter()
    .map(|(name, path, description)| SearchEntry::new(name, path, description))
    .collect()
});

/// Shorthand for `&CATALOG[..]`.
pub fn catalog() -> &'static [SearchEntry] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_paths_unique() {
        let mut paths: Vec<_> = catalog().iter().map(|e| e.path.as_str()).collect();
        let total = paths.len();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(catalog()[0].name, "Calculators");
        assert_eq!(catalog().last().map(|e| e.path.as_str()), Some("/about"));
    }
}
