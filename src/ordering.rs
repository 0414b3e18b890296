use crate::batch::OutputRow;

/// Sorts rows by their result column using plain string comparison.
///
/// Due dates are `YYYY-MM-DD`, so this is chronological for them. Error
/// messages get no special treatment and land wherever their text sorts.
/// The sort is stable: rows with equal results keep their relative order.
pub fn sort_rows(rows: &mut [OutputRow]) {
    rows.sort_by(|a, b| a.result.cmp(&b.result));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(rows: &[OutputRow]) -> Vec<&str> {
        rows.iter().map(|r| r.result.as_str()).collect()
    }

    #[test]
    fn should_sort_by_due_date() {
        let mut rows = vec![
            OutputRow::new("Mock-Fattura-1", "0000-00-01", "2019-05-15"),
            OutputRow::new("Mock-Fattura-2", "0000-00-02", "2019-04-15"),
            OutputRow::new("Mock-Fattura-3", "0000-00-03", "2019-05-03"),
        ];
        sort_rows(&mut rows);

        assert_eq!(
            rows,
            vec![
                OutputRow::new("Mock-Fattura-2", "0000-00-02", "2019-04-15"),
                OutputRow::new("Mock-Fattura-3", "0000-00-03", "2019-05-03"),
                OutputRow::new("Mock-Fattura-1", "0000-00-01", "2019-05-15"),
            ]
        );
    }

    #[test]
    fn should_be_idempotent() {
        let mut rows = vec![
            OutputRow::new("1", "", "2019-05-15"),
            OutputRow::new("2", "", "Invalid Mode at ID 2: XYZ"),
            OutputRow::new("3", "", "2019-04-15"),
        ];
        sort_rows(&mut rows);
        let once = rows.clone();
        sort_rows(&mut rows);

        assert_eq!(rows, once);
        assert_eq!(
            results(&rows),
            vec!["2019-04-15", "2019-05-15", "Invalid Mode at ID 2: XYZ"]
        );
    }

    #[test]
    fn should_keep_encounter_order_for_equal_results() {
        let mut rows = vec![
            OutputRow::new("B", "2019-05-31", "2019-05-31"),
            OutputRow::new("A", "2019-05-01", "2019-04-30"),
            OutputRow::new("C", "2019-05-06", "2019-05-31"),
            OutputRow::new("D", "2019-05-31", "2019-05-31"),
        ];
        sort_rows(&mut rows);

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn should_sort_empty_rows() {
        let mut rows: Vec<OutputRow> = Vec::new();
        sort_rows(&mut rows);
        assert!(rows.is_empty());
    }
}
