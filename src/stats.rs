use crate::data::model::Mutation;

// ---------------------------------------------------------------------------
// Integer truncation
// ---------------------------------------------------------------------------

/// Truncate toward zero. Non-finite values (a price over a zero area, for
/// instance) become 0.
pub fn truncate(x: f64) -> i64 {
    if x.is_finite() {
        x.trunc() as i64
    } else {
        0
    }
}

/// Price per m² of built surface, truncated.
pub fn price_per_area(mutation: &Mutation) -> i64 {
    truncate(mutation.price / mutation.building_area)
}

// ---------------------------------------------------------------------------
// Summary of a filtered set
// ---------------------------------------------------------------------------

/// Count, average and median of the price per m² over a filtered set.
///
/// `average` and `median` are `None` when the set is empty, which is not the
/// same thing as a computed zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub average: Option<i64>,
    pub median: Option<i64>,
}

impl Summary {
    pub fn from_mutations<'a>(mutations: impl IntoIterator<Item = &'a Mutation>) -> Self {
        let values: Vec<i64> = mutations.into_iter().map(price_per_area).collect();
        Self::from_values(values)
    }

    /// Summarise already computed per-unit prices.
    ///
    /// The median is the element at `len / 2` after sorting: for an even
    /// count this is the upper of the two middle values, not their mean.
    pub fn from_values(mut values: Vec<i64>) -> Self {
        let count = values.len();
        if count == 0 {
            return Self::default();
        }
        values.sort_unstable();
        // Per-unit prices can be as large as i64::MAX; sum in f64.
        let sum: f64 = values.iter().map(|&v| v as f64).sum();
        Self {
            count,
            average: Some(truncate(sum / count as f64)),
            median: Some(values[count / 2]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(price: f64, building_area: f64) -> Mutation {
        Mutation {
            id: "m".into(),
            date: "2023-01-01".into(),
            price,
            land_area: 0.0,
            building_area,
            parcels: vec![],
        }
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(truncate(2.9), 2);
        assert_eq!(truncate(-2.9), -2);
        assert_eq!(truncate(f64::INFINITY), 0);
        assert_eq!(truncate(f64::NAN), 0);
    }

    #[test]
    fn price_per_area_is_truncated() {
        assert_eq!(price_per_area(&sale(100_000.0, 30.0)), 3333);
        assert_eq!(price_per_area(&sale(100_000.0, 0.0)), 0);
    }

    #[test]
    fn empty_set_has_no_average_or_median() {
        let s = Summary::from_values(vec![]);
        assert_eq!(s.count, 0);
        assert_eq!(s.average, None);
        assert_eq!(s.median, None);
    }

    #[test]
    fn even_count_median_takes_upper_middle() {
        let s = Summary::from_values(vec![10, 20, 30, 40]);
        assert_eq!(s.median, Some(30));
        assert_eq!(s.average, Some(25));
    }

    #[test]
    fn sorts_before_picking_median() {
        let s = Summary::from_values(vec![40, 10, 30]);
        assert_eq!(s.median, Some(30));
        assert_eq!(s.average, Some(26));
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let s = Summary::from_values(vec![i64::MAX, i64::MAX]);
        assert_eq!(s.count, 2);
        assert_eq!(s.median, Some(i64::MAX));
        assert!(s.average.is_some());
    }

    #[test]
    fn tiny_building_area_summarises() {
        let sales = [sale(250_000.0, 1e-15), sale(300_000.0, 1e-15)];
        let s = Summary::from_mutations(&sales);
        assert_eq!(s.count, 2);
        assert_eq!(s.median, Some(i64::MAX));
    }

    #[test]
    fn summarises_mutations() {
        let sales = [sale(200_000.0, 100.0), sale(300_000.0, 150.0), sale(99_999.0, 50.0)];
        let s = Summary::from_mutations(&sales);
        assert_eq!(s.count, 3);
        // 2000, 2000, 1999
        assert_eq!(s.median, Some(2000));
        assert_eq!(s.average, Some(1999));
    }
}
