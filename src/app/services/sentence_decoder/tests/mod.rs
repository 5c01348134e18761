//! Tests for NMEA sentence decoding
//!
//! Fixtures use the reference sentences from the NMEA-0183 documentation so
//! their checksums are independently known.


use super::framing::checksum;

/// Reference GGA sentence (checksum 47)
pub const REFERENCE_GGA: &str =
    "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";

/// Reference ZDA sentence (checksum 60)
pub const REFERENCE_ZDA: &str = "$GPZDA,201530.00,04,07,2002,00,00*60";

/// Reference RMC sentence (checksum 6A)
pub const REFERENCE_RMC: &str =
    "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

/// Reference GLL sentence (checksum 31)
pub const REFERENCE_GLL: &str = "$GPGLL,4916.45,N,12311.12,W,225444,A*31";

/// Reference VTG sentence (checksum 48)
pub const REFERENCE_VTG: &str = "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48";

/// Wrap a sentence body in `$...*hh` with a correct checksum
pub fn create_test_sentence(body: &str) -> String {
    format!("${}*{:02X}", body, checksum(body))
}
