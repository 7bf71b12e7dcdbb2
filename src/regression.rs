//! Ordinary least squares of price against two area predictors.
//!
//! The design matrix has one row per mutation and the columns
//! `[1, building, land]`; the coefficients solve the normal equations
//! `(AᵗA) β = Aᵗy` in closed form.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::config::PredictorLayout;
use crate::data::model::Mutation;

/// Number of fitted parameters (intercept + two slopes).
pub const PARAMETERS: usize = 3;

/// `det(AᵗA) / Π diag(AᵗA)` below this means the columns are dependent.
///
/// For a Gram matrix this ratio lies in `[0, 1]` whatever the units of the
/// columns, so one threshold works for m² and for hectares alike.
const SINGULAR_RATIO: f64 = 1e-12;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    #[error("no transactions to fit")]
    Empty,
    #[error("{rows} transaction(s) cannot determine 3 parameters")]
    TooFewRows { rows: usize },
    #[error("area columns are linearly dependent")]
    Singular,
}

// ---------------------------------------------------------------------------
// RegressionModel
// ---------------------------------------------------------------------------

/// Fitted coefficients. Only ever produced whole by [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    pub intercept: f64,
    pub building_coefficient: f64,
    pub land_coefficient: f64,
}

impl RegressionModel {
    /// `intercept + building_coefficient·building + land_coefficient·land`,
    /// or `None` if either input is not finite.
    pub fn predict(&self, land_area: f64, building_area: f64) -> Option<f64> {
        if !(land_area.is_finite() && building_area.is_finite()) {
            return None;
        }
        Some(
            self.intercept
                + self.building_coefficient * building_area
                + self.land_coefficient * land_area,
        )
    }
}

/// Predict with a model that may be absent.
pub fn predict(model: Option<&RegressionModel>, land_area: f64, building_area: f64) -> Option<f64> {
    model?.predict(land_area, building_area)
}

// ---------------------------------------------------------------------------
// Fitting
// ---------------------------------------------------------------------------

/// Build the design matrix `A` and response `y` for `mutations`.
pub fn design_matrix<'a>(
    mutations: impl IntoIterator<Item = &'a Mutation>,
    layout: PredictorLayout,
) -> (DMatrix<f64>, DVector<f64>) {
    let mut cells = Vec::new();
    let mut prices = Vec::new();
    for m in mutations {
        let (building, land) = layout.assign(m.land_area, m.building_area);
        cells.extend([1.0, building, land]);
        prices.push(m.price);
    }
    let rows = prices.len();
    (
        DMatrix::from_row_slice(rows, PARAMETERS, &cells),
        DVector::from_vec(prices),
    )
}

/// Fit `price ~ 1 + building + land` over `mutations`.
///
/// Fails on an empty set, on fewer than three rows, and whenever `AᵗA`
/// cannot be inverted. Callers treat every failure as "no model".
pub fn fit<'a>(
    mutations: impl IntoIterator<Item = &'a Mutation>,
    layout: PredictorLayout,
) -> Result<RegressionModel, FitError> {
    let (a, y) = design_matrix(mutations, layout);
    match a.nrows() {
        0 => return Err(FitError::Empty),
        rows if rows < PARAMETERS => return Err(FitError::TooFewRows { rows }),
        _ => {}
    }

    let ata = a.tr_mul(&a);
    let aty = a.tr_mul(&y);

    let scale = ata.diagonal().product();
    if !scale.is_finite() || scale <= 0.0 || ata.determinant() / scale < SINGULAR_RATIO {
        return Err(FitError::Singular);
    }

    let beta = ata.try_inverse().ok_or(FitError::Singular)? * aty;
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(FitError::Singular);
    }

    Ok(RegressionModel {
        intercept: beta[0],
        building_coefficient: beta[1],
        land_coefficient: beta[2],
    })
}
