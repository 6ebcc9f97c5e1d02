//! Option lists for the registration form selects.

fn to_options(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
	pairs
		.iter()
		.map(|(value, label)| (value.to_string(), label.to_string()))
		.collect()
}

/// US states and the District of Columbia, keyed by postal code.
pub fn us_states() -> Vec<(String, String)> {
	to_options(&[
		("AL", "Alabama"),
		("AK", "Alaska"),
		("AZ", "Arizona"),
		("AR", "Arkansas"),
		("CA", "California"),
		("CO", "Colorado"),
		("CT", "Connecticut"),
		("DE", "Delaware"),
		("DC", "District of Columbia"),
		("FL", "Florida"),
		("GA", "Georgia"),
		("HI", "Hawaii"),
		("ID", "Idaho"),
		("IL", "Illinois"),
		("IN", "Indiana"),
		("IA", "Iowa"),
		("KS", "Kansas"),
		("KY", "Kentucky"),
		("LA", "Louisiana"),
		("ME", "Maine"),
		("MD", "Maryland"),
		("MA", "Massachusetts"),
		("MI", "Michigan"),
		("MN", "Minnesota"),
		("MS", "Mississippi"),
		("MO", "Missouri"),
		("MT", "Montana"),
		("NE", "Nebraska"),
		("NV", "Nevada"),
		("NH", "New Hampshire"),
		("NJ", "New Jersey"),
		("NM", "New Mexico"),
		("NY", "New York"),
		("NC", "North Carolina"),
		("ND", "North Dakota"),
		("OH", "Ohio"),
		("OK", "Oklahoma"),
		("OR", "Oregon"),
		("PA", "Pennsylvania"),
		("RI", "Rhode Island"),
		("SC", "South Carolina"),
		("SD", "South Dakota"),
		("TN", "Tennessee"),
		("TX", "Texas"),
		("UT", "Utah"),
		("VT", "Vermont"),
		("VA", "Virginia"),
		("WA", "Washington"),
		("WV", "West Virginia"),
		("WI", "Wisconsin"),
		("WY", "Wyoming"),
	])
}

/// Canadian provinces and territories, keyed by postal abbreviation.
pub fn canadian_provinces() -> Vec<(String, String)> {
	to_options(&[
		("AB", "Alberta"),
		("BC", "British Columbia"),
		("MB", "Manitoba"),
		("NB", "New Brunswick"),
		("NL", "Newfoundland and Labrador"),
		("NT", "Northwest Territories"),
		("NS", "Nova Scotia"),
		("NU", "Nunavut"),
		("ON", "Ontario"),
		("PE", "Prince Edward Island"),
		("QC", "Quebec"),
		("SK", "Saskatchewan"),
		("YT", "Yukon"),
	])
}

/// US states followed by Canadian provinces, the state select roster.
pub fn state_options() -> Vec<(String, String)> {
	let mut options = us_states();
	options.extend(canadian_provinces());
	options
}

/// Countries offered on the form, keyed by ISO 3166-1 alpha-2 code.
pub fn countries() -> Vec<(String, String)> {
	to_options(&[
		("US", "United States"),
		("CA", "Canada"),
		("AU", "Australia"),
		("AT", "Austria"),
		("BE", "Belgium"),
		("BR", "Brazil"),
		("CN", "China"),
		("DK", "Denmark"),
		("FI", "Finland"),
		("FR", "France"),
		("DE", "Germany"),
		("IN", "India"),
		("IE", "Ireland"),
		("IT", "Italy"),
		("JP", "Japan"),
		("KR", "South Korea"),
		("MX", "Mexico"),
		("NL", "Netherlands"),
		("NZ", "New Zealand"),
		("NO", "Norway"),
		("PT", "Portugal"),
		("ES", "Spain"),
		("SE", "Sweden"),
		("CH", "Switzerland"),
		("GB", "United Kingdom"),
	])
}
