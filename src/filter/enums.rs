// SPDX-License-Identifier: MIT

//! Standard OpenTelemetry enum symbols

use once_cell::sync::Lazy;

use crate::ottl::EnumTable;

const SEVERITY_LEVELS: [&str; 6] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "FATAL"];

static STANDARD_ENUMS: Lazy<EnumTable> = Lazy::new(|| {
    let mut table = EnumTable::new();

    // SEVERITY_NUMBER_TRACE = 1 .. SEVERITY_NUMBER_FATAL4 = 24
    table.insert("SEVERITY_NUMBER_UNSPECIFIED", 0);
    for (i, level) in SEVERITY_LEVELS.iter().enumerate() {
        let base = 1 + 4 * i as i64;
        table.insert(format!("SEVERITY_NUMBER_{}", level), base);
        for step in 2..=4 {
            table.insert(format!("SEVERITY_NUMBER_{}{}", level, step), base + step - 1);
        }
    }

    table.extend([
        ("SPAN_KIND_UNSPECIFIED", 0),
        ("SPAN_KIND_INTERNAL", 1),
        ("SPAN_KIND_SERVER", 2),
        ("SPAN_KIND_CLIENT", 3),
        ("SPAN_KIND_PRODUCER", 4),
        ("SPAN_KIND_CONSUMER", 5),
        ("STATUS_CODE_UNSET", 0),
        ("STATUS_CODE_OK", 1),
        ("STATUS_CODE_ERROR", 2),
        ("METRIC_DATA_TYPE_NONE", 0),
        ("METRIC_DATA_TYPE_GAUGE", 1),
        ("METRIC_DATA_TYPE_SUM", 2),
        ("METRIC_DATA_TYPE_HISTOGRAM", 3),
        ("METRIC_DATA_TYPE_EXPONENTIAL_HISTOGRAM", 4),
        ("METRIC_DATA_TYPE_SUMMARY", 5),
        ("AGGREGATION_TEMPORALITY_UNSPECIFIED", 0),
        ("AGGREGATION_TEMPORALITY_DELTA", 1),
        ("AGGREGATION_TEMPORALITY_CUMULATIVE", 2),
    ]);
    table
});

/// A copy of the standard symbol table, ready to be extended
pub fn standard_enums() -> EnumTable {
    STANDARD_ENUMS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_numbers() {
        let table = standard_enums();
        assert_eq!(table.get("SEVERITY_NUMBER_UNSPECIFIED"), Some(0));
        assert_eq!(table.get("SEVERITY_NUMBER_TRACE"), Some(1));
        assert_eq!(table.get("SEVERITY_NUMBER_TRACE4"), Some(4));
        assert_eq!(table.get("SEVERITY_NUMBER_DEBUG"), Some(5));
        assert_eq!(table.get("SEVERITY_NUMBER_INFO"), Some(9));
        assert_eq!(table.get("SEVERITY_NUMBER_WARN"), Some(13));
        assert_eq!(table.get("SEVERITY_NUMBER_ERROR"), Some(17));
        assert_eq!(table.get("SEVERITY_NUMBER_FATAL4"), Some(24));
        assert_eq!(table.get("SEVERITY_NUMBER_INFO1"), None);
    }

    #[test]
    fn test_span_and_status() {
        let table = standard_enums();
        assert_eq!(table.get("SPAN_KIND_SERVER"), Some(2));
        assert_eq!(table.get("STATUS_CODE_ERROR"), Some(2));
        assert_eq!(table.get("AGGREGATION_TEMPORALITY_CUMULATIVE"), Some(2));
    }

    #[test]
    fn test_copies_are_independent() {
        let mut table = standard_enums();
        table.insert("CUSTOM", 42);
        assert_eq!(standard_enums().get("CUSTOM"), None);
    }
}
