// src/schemes/payoffs.rs
//! Payoffs and boundary values for European options
//!
//! # Price space
//!
//! | | payoff at `t = T` | `V(0, t)` | `V(L, t)` |
//! |---|---|---|---|
//! | Call | `max(S - K, 0)` | `0` | `L - K·e^{-r(T-t)}` |
//! | Put  | `max(K - S, 0)` | `K·e^{-r(T-t)}` | `0` |
//!
//! # Heat-equation space
//!
//! With `a₋ = ½(f-1)` and `a₊ = ½(f+1)` the payoffs become
//! ```text
//! call: max(e^{a₊x} - e^{a₋x}, 0)      put: max(e^{a₋x} - e^{a₊x}, 0)
//! ```
//! Deep in the money the option behaves like a forward, whose transformed value
//! `e^{a₊x + a₊²τ} - e^{a₋x + a₋²τ}` (sign flipped for the put) solves the heat
//! equation exactly. That far-field solution feeds the edge of the grid on the
//! in-the-money side; the out-of-the-money edge sees zero.

/// European option type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    Call,
    Put,
}

/// Edge of the price grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEdge {
    /// `S = 0`, or `x → -∞` in log-price
    Lower,
    /// `S = L`, or `x → +∞` in log-price
    Upper,
}

impl OptionType {
    /// Payoff at maturity
    pub fn payoff(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Dirichlet value on a price-grid edge, `time_to_maturity = T - t`
    pub fn boundary_value(
        &self,
        edge: GridEdge,
        max_price: f64,
        strike: f64,
        rate: f64,
        time_to_maturity: f64,
    ) -> f64 {
        let discounted_strike = strike * (-rate * time_to_maturity).exp();
        match (self, edge) {
            (OptionType::Call, GridEdge::Lower) => 0.0,
            (OptionType::Call, GridEdge::Upper) => max_price - discounted_strike,
            (OptionType::Put, GridEdge::Lower) => discounted_strike,
            (OptionType::Put, GridEdge::Upper) => 0.0,
        }
    }

    /// Payoff in heat-equation variables at `τ = 0`
    pub fn transformed_payoff(&self, x: f64, a_minus: f64, a_plus: f64) -> f64 {
        let put_like = (a_minus * x).exp() - (a_plus * x).exp();
        match self {
            OptionType::Call => (-put_like).max(0.0),
            OptionType::Put => put_like.max(0.0),
        }
    }

    /// Edge on which the option finishes in the money
    pub fn in_the_money_edge(&self) -> GridEdge {
        match self {
            OptionType::Call => GridEdge::Upper,
            OptionType::Put => GridEdge::Lower,
        }
    }

    /// Heat-equation value beyond `edge` at log-price `x` and time `tau`
    pub fn far_field(&self, edge: GridEdge, x: f64, tau: f64, a_minus: f64, a_plus: f64) -> f64 {
        if edge != self.in_the_money_edge() {
            return 0.0;
        }
        let forward = (a_plus * x + a_plus * a_plus * tau).exp()
            - (a_minus * x + a_minus * a_minus * tau).exp();
        match self {
            OptionType::Call => forward,
            OptionType::Put => -forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoffs() {
        assert_eq!(OptionType::Call.payoff(120.0, 100.0), 20.0);
        assert_eq!(OptionType::Call.payoff(80.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.payoff(80.0, 100.0), 20.0);
        assert_eq!(OptionType::Put.payoff(120.0, 100.0), 0.0);
    }

    #[test]
    fn test_boundary_values() {
        let discounted = 100.0 * (-0.05_f64).exp();
        let call = OptionType::Call;
        let put = OptionType::Put;

        assert_eq!(call.boundary_value(GridEdge::Lower, 300.0, 100.0, 0.05, 1.0), 0.0);
        assert!((call.boundary_value(GridEdge::Upper, 300.0, 100.0, 0.05, 1.0) - (300.0 - discounted)).abs() < 1e-12);
        assert!((put.boundary_value(GridEdge::Lower, 300.0, 100.0, 0.05, 1.0) - discounted).abs() < 1e-12);
        assert_eq!(put.boundary_value(GridEdge::Upper, 300.0, 100.0, 0.05, 1.0), 0.0);
    }

    #[test]
    fn test_far_field_matches_transformed_payoff_at_zero_time() {
        let (a_minus, a_plus) = (0.75, 1.75);
        for &x in &[0.3, 1.0] {
            let call = OptionType::Call;
            assert!((call.far_field(GridEdge::Upper, x, 0.0, a_minus, a_plus) - call.transformed_payoff(x, a_minus, a_plus)).abs() < 1e-12);
            assert_eq!(call.far_field(GridEdge::Lower, -x, 0.5, a_minus, a_plus), 0.0);
        }
        for &x in &[-0.3, -1.0] {
            let put = OptionType::Put;
            assert!((put.far_field(GridEdge::Lower, x, 0.0, a_minus, a_plus) - put.transformed_payoff(x, a_minus, a_plus)).abs() < 1e-12);
            assert_eq!(put.far_field(GridEdge::Upper, -x, 0.5, a_minus, a_plus), 0.0);
        }
    }

    #[test]
    fn test_far_field_solves_heat_equation() {
        // e^{ax + a²τ} satisfies u_τ = u_xx, so a centred check holds to O(h²).
        let (a_minus, a_plus) = (0.75, 1.75);
        let put = OptionType::Put;
        let (x, tau, h) = (-0.8, 0.1, 1e-3);
        let u = |x: f64, tau: f64| put.far_field(GridEdge::Lower, x, tau, a_minus, a_plus);

        let u_tau = (u(x, tau + h) - u(x, tau - h)) / (2.0 * h);
        let u_xx = (u(x + h, tau) - 2.0 * u(x, tau) + u(x - h, tau)) / (h * h);
        assert!((u_tau - u_xx).abs() < 1e-4, "{} vs {}", u_tau, u_xx);
    }
}
