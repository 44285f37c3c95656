use humansize::{format_size, BINARY};

/// Format an octet count in binary units (B, KiB, MiB, ...)
///
/// Switch counters arrive as JSON numbers; negative or non-finite values
/// render as zero.
pub fn format_bytes(octets: f64) -> String {
    let octets = if octets.is_finite() && octets > 0.0 {
        octets as u64
    } else {
        0
    };
    format_size(octets, BINARY)
}
