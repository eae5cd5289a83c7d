//! Display names for the numeric document-type codes used on the wire.

/// Human-readable name for a document-type code. Unknown codes fall back to
/// `"Unknown"`.
pub fn name(type_id: u8) -> &'static str {
    match type_id {
        0 => "Document",
        1 => "Passport",
        2 => "Internal passport",
        3 => "Foreign passport",
        4 => "Identity card",
        5 => "Driving license",
        6 => "Hunting license",
        7 => "Firearms license",
        8 => "Medical insurance",
        9 => "Property insurance",
        10 => "Vehicle insurance",
        11 => "Personal insurance",
        12 => "Visa",
        13 => "Student visa",
        14 => "Work permit",
        15 => "Residence permit",
        16 => "Credit card",
        17 => "Certificate",
        18 => "Vaccination Certificate",
        19 => "Warranty Certificate",
        20 => "Coupon",
        21 => "Travel card",
        255 => "Other",
        _ => "Unknown",
    }
}
