//! One-Sided Commitment Economy (RMT Chapter 20)
//!
//! A risk-averse household with CARA utility receives i.i.d. income draws
//! and trades with a risk-neutral money lender who can commit. The
//! household cannot commit: in any period it may walk away to autarky.
//!
//! ## Contract Structure
//! 1. The household starts with promised value `v_aut`, so the lender
//!    extracts all gains from insurance
//! 2. Each income state k has a consumption level `c_k` and continuation
//!    promise `w_k` at which the participation constraint just binds
//! 3. Consumption ratchets: it stays put in states whose constraint is
//!    slack and jumps to `c_k` the first time a higher state k arrives
//!
//! The policy levels come out of a backward recursion over states; the
//! lender's value is found by fixed-point iteration on its Bellman equation.

use itertools_num::linspace;
use rand::prelude::*;
use rand_distr::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};

use crate::error::{FigureError, Result};
use crate::fixed_point::FixedPointSolver;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyParams {
    pub beta: f64,  // Discount factor (household and lender)
    pub gamma: f64, // CARA coefficient
    pub ymin: f64,
    pub ymax: f64,
    pub ny: usize,  // Number of income states
    pub lamb: f64,  // Geometric decay of state probabilities
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            beta: 0.92,
            gamma: 0.8,
            ymin: 6.0,
            ymax: 15.0,
            ny: 10,
            lamb: 0.66,
        }
    }
}

impl EconomyParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("ymin", self.ymin),
            ("ymax", self.ymax),
            ("lamb", self.lamb),
        ] {
            if !value.is_finite() {
                return Err(FigureError::invalid(name, "must be finite"));
            }
        }
        if self.beta <= 0.0 || self.beta >= 1.0 {
            return Err(FigureError::invalid("beta", "must lie in (0, 1)"));
        }
        if self.gamma <= 0.0 {
            return Err(FigureError::invalid("gamma", "must be positive"));
        }
        if self.ny == 0 {
            return Err(FigureError::invalid("ny", "need at least one income state"));
        }
        if self.ymin > self.ymax {
            return Err(FigureError::invalid("ymin", "must not exceed ymax"));
        }
        if self.lamb <= 0.0 || self.lamb >= 1.0 {
            return Err(FigureError::invalid("lamb", "must lie in (0, 1)"));
        }
        state_probabilities(self.lamb, self.ny)?;
        Ok(())
    }
}

/// Truncated-geometric weights `(1-lamb)/(1-lamb^ny) * lamb^k`. Every state
/// must keep positive mass, so weights that underflow are rejected.
pub fn state_probabilities(lamb: f64, ny: usize) -> Result<Vec<f64>> {
    let n = i32::try_from(ny)
        .map_err(|_| FigureError::invalid("ny", "too many income states"))?;
    let scale = (1.0 - lamb) / (1.0 - lamb.powi(n));
    let pi: Vec<f64> = (0..n).map(|k| scale * lamb.powi(k)).collect();

    if let Some(k) = pi.iter().position(|p| !(*p > 0.0 && p.is_finite())) {
        return Err(FigureError::invalid(
            "ny",
            format!("state {k} has zero probability with lamb = {lamb}; use fewer states"),
        ));
    }
    Ok(pi)
}

#[derive(Clone, Debug)]
pub struct Economy {
    pub beta: f64,
    pub gamma: f64,
    pub ybar: Vec<f64>,
    pub pi: Vec<f64>,
    pub v_aut: f64,
    pub c_complete_markets: f64,
    state_dist: WeightedIndex<f64>,
}

impl Economy {
    pub fn new(params: EconomyParams) -> Result<Self> {
        params.validate()?;

        let ybar: Vec<f64> = linspace(params.ymin, params.ymax, params.ny).collect();
        let pi = state_probabilities(params.lamb, params.ny)?;

        let state_dist = WeightedIndex::new(&pi)
            .map_err(|e| FigureError::invalid("lamb", format!("bad state distribution: {e}")))?;

        let mut economy = Self {
            beta: params.beta,
            gamma: params.gamma,
            ybar,
            pi,
            v_aut: 0.0,
            c_complete_markets: 0.0,
            state_dist,
        };

        let expected_utility: f64 = economy
            .pi
            .iter()
            .zip(economy.ybar.iter())
            .map(|(p, y)| p * economy.u(*y))
            .sum();
        economy.v_aut = expected_utility / (1.0 - economy.beta);
        economy.c_complete_markets =
            economy.u_inverse_checked((1.0 - economy.beta) * economy.v_aut)?;

        Ok(economy)
    }

    pub fn nstates(&self) -> usize {
        self.ybar.len()
    }

    pub fn u(&self, c: f64) -> f64 {
        (-self.gamma * c).exp() / (-self.gamma)
    }

    pub fn u_prime(&self, c: f64) -> f64 {
        (-self.gamma * c).exp()
    }

    /// Consumption delivering utility `v`. Only negative utilities are
    /// reachable under CARA.
    pub fn u_inverse(&self, v: f64) -> Option<f64> {
        if v < 0.0 && v.is_finite() {
            Some(-(-self.gamma * v).ln() / self.gamma)
        } else {
            None
        }
    }

    fn u_inverse_checked(&self, v: f64) -> Result<f64> {
        self.u_inverse(v).ok_or(FigureError::OutOfDomain { value: v })
    }

    /// Value of walking away to autarky after income state `k` is realised.
    pub fn exit_value(&self, k: usize) -> f64 {
        self.u(self.ybar[k]) + self.beta * self.v_aut
    }

    pub fn expected_income(&self) -> f64 {
        self.pi.iter().zip(self.ybar.iter()).map(|(p, y)| p * y).sum()
    }

    pub fn solve(&self, solver: &FixedPointSolver) -> Result<Contract> {
        let n = self.nstates();
        let exit: Vec<f64> = (0..n).map(|k| self.exit_value(k)).collect();

        // Backward over states: everything above k contributes its own exit
        // value, everything at or below k is pooled at k.
        let mut continuation = vec![0.0; n];
        let mut tail = 0.0;
        for k in (0..n).rev() {
            let mass_below: f64 = self.pi[..=k].iter().sum();
            continuation[k] = mass_below * exit[k] + tail;
            tail += self.pi[k] * exit[k];
        }

        let consumption = (0..n)
            .map(|k| self.u_inverse_checked(exit[k] - self.beta * continuation[k]))
            .collect::<Result<Vec<f64>>>()?;

        let lender = solver.solve(vec![0.0; n], |values| {
            (0..n)
                .map(|k| {
                    (0..n)
                        .map(|j| {
                            let m = j.max(k);
                            self.pi[j] * (self.ybar[j] - consumption[m] + self.beta * values[m])
                        })
                        .sum::<f64>()
                })
                .collect()
        })?;

        log::debug!(
            "contract solved: {} states, lender value converged in {} iterations",
            n,
            lender.iterations
        );

        Ok(Contract {
            consumption,
            continuation,
            lender_value: lender.values,
            lender_iterations: lender.iterations,
        })
    }

    pub fn draw_state(&self, rng: &mut impl Rng) -> usize {
        self.state_dist.sample(rng)
    }

    pub fn simulate(&self, contract: &Contract, periods: usize, rng: &mut impl Rng) -> Path {
        let mut path = Path::with_capacity(periods);
        let mut level: Option<usize> = None;

        for _ in 0..periods {
            let state = self.draw_state(rng);
            let k = level.map_or(state, |l| l.max(state));
            level = Some(k);

            path.state.push(state);
            path.income.push(self.ybar[state]);
            path.consumption.push(contract.consumption[k]);
            path.promised.push(contract.continuation[k]);
        }

        path
    }

    pub fn simulate_many(
        &self,
        contract: &Contract,
        npaths: usize,
        periods: usize,
        rng: &mut impl Rng,
    ) -> Vec<Path> {
        (0..npaths)
            .map(|_| self.simulate(contract, periods, rng))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contract {
    pub consumption: Vec<f64>,
    pub continuation: Vec<f64>,
    pub lender_value: Vec<f64>,
    pub lender_iterations: usize,
}

impl Contract {
    /// Lender's expected profit at the start of the relationship, before
    /// the first income draw.
    pub fn initial_lender_value(&self) -> f64 {
        self.lender_value[0]
    }

    pub fn long_run_consumption(&self) -> f64 {
        self.consumption.last().copied().unwrap_or(f64::NAN)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub consumption: Vec<f64>,
    pub promised: Vec<f64>,
    pub income: Vec<f64>,
    pub state: Vec<usize>,
}

impl Path {
    fn with_capacity(periods: usize) -> Self {
        Self {
            consumption: Vec::with_capacity(periods),
            promised: Vec::with_capacity(periods),
            income: Vec::with_capacity(periods),
            state: Vec::with_capacity(periods),
        }
    }

    pub fn len(&self) -> usize {
        self.consumption.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumption.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> (Economy, Contract) {
        let economy = Economy::new(EconomyParams::default()).unwrap();
        let contract = economy.solve(&FixedPointSolver::default()).unwrap();
        (economy, contract)
    }

    #[test]
    fn test_primitives() {
        let economy = Economy::new(EconomyParams::default()).unwrap();

        assert_eq!(economy.nstates(), 10);
        assert!((economy.ybar[0] - 6.0).abs() < 1e-12);
        assert!((economy.ybar[9] - 15.0).abs() < 1e-9);
        assert!((economy.ybar[1] - 7.0).abs() < 1e-9);

        let total: f64 = economy.pi.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(economy.pi.windows(2).all(|w| w[1] < w[0]));
        assert!(economy.pi.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn test_underflowing_probabilities_rejected() {
        let params = EconomyParams {
            lamb: 0.01,
            ny: 200,
            ..EconomyParams::default()
        };
        let err = Economy::new(params).unwrap_err();
        assert!(matches!(err, FigureError::InvalidParameter { ref name, .. } if name == "ny"));

        assert!(state_probabilities(0.01, usize::MAX).is_err());
    }

    #[test]
    fn test_many_states_keep_positive_mass() {
        let params = EconomyParams {
            ny: 200,
            ..EconomyParams::default()
        };
        let economy = Economy::new(params).unwrap();

        assert!(economy.pi.iter().all(|p| *p > 0.0));
        let total: f64 = economy.pi.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_utility_inverse() {
        let economy = Economy::new(EconomyParams::default()).unwrap();
        for c in [0.5, 6.0, 12.3] {
            let back = economy.u_inverse(economy.u(c)).unwrap();
            assert!((back - c).abs() < 1e-9);
        }
        assert!(economy.u_inverse(0.0).is_none());
        assert!(economy.u_inverse(0.3).is_none());
        assert!((economy.u_prime(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_complete_markets_is_certainty_equivalent() {
        let economy = Economy::new(EconomyParams::default()).unwrap();
        let c = economy.c_complete_markets;

        assert!((economy.u(c) / (1.0 - economy.beta) - economy.v_aut).abs() < 1e-12);
        assert!(c > economy.ybar[0]);
        assert!(c < economy.expected_income());
    }

    #[test]
    fn test_lowest_state_reference_values() {
        let (economy, contract) = textbook();

        assert!((contract.consumption[0] - economy.ybar[0]).abs() < 1e-9);
        assert!((contract.continuation[0] - economy.v_aut).abs() < 1e-12);
    }

    #[test]
    fn test_participation_binds_in_every_state() {
        let (economy, contract) = textbook();

        for k in 0..economy.nstates() {
            let inside =
                economy.u(contract.consumption[k]) + economy.beta * contract.continuation[k];
            assert!((inside - economy.exit_value(k)).abs() < 1e-12, "state {k}");
        }
    }

    #[test]
    fn test_promise_keeping() {
        let (economy, contract) = textbook();
        let n = economy.nstates();

        for k in 0..n {
            let delivered: f64 = (0..n)
                .map(|j| {
                    let m = j.max(k);
                    economy.pi[j]
                        * (economy.u(contract.consumption[m])
                            + economy.beta * contract.continuation[m])
                })
                .sum();
            assert!((delivered - contract.continuation[k]).abs() < 1e-12, "state {k}");
        }
    }

    #[test]
    fn test_policies_are_monotone() {
        let (_, contract) = textbook();

        assert!(contract.consumption.windows(2).all(|w| w[1] >= w[0]));
        assert!(contract.continuation.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_lender_value_converges_and_is_profitable() {
        let (economy, contract) = textbook();
        let solver = FixedPointSolver::default();

        assert!(contract.lender_iterations < solver.max_iter);
        assert!(contract.initial_lender_value() > 0.0);

        let n = economy.nstates();
        for k in 0..n {
            let rhs: f64 = (0..n)
                .map(|j| {
                    let m = j.max(k);
                    economy.pi[j]
                        * (economy.ybar[j] - contract.consumption[m]
                            + economy.beta * contract.lender_value[m])
                })
                .sum();
            assert!((rhs - contract.lender_value[k]).abs() < 1e-8);
        }
    }

    #[test]
    fn test_lender_value_iteration_cap() {
        let economy = Economy::new(EconomyParams::default()).unwrap();
        let result = economy.solve(&FixedPointSolver::new(1e-10, 1));
        assert!(matches!(result, Err(FigureError::NoConvergence { .. })));
    }

    #[test]
    fn test_simulation_ratchets_up() {
        let (economy, contract) = textbook();
        let mut rng = StdRng::seed_from_u64(7);
        let path = economy.simulate(&contract, 200, &mut rng);

        assert_eq!(path.len(), 200);
        assert!(path.consumption.windows(2).all(|w| w[1] >= w[0]));
        assert!(path.promised.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(path.consumption[0], contract.consumption[path.state[0]]);

        for (c, y) in path.consumption.iter().zip(path.income.iter()) {
            assert!(*c <= contract.long_run_consumption());
            assert!(*y >= economy.ybar[0]);
        }
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let (economy, contract) = textbook();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = economy.simulate_many(&contract, 5, 50, &mut a);
        let second = economy.simulate_many(&contract, 5, 50, &mut b);

        assert_eq!(first, second);
    }

    #[test]
    fn test_single_state_economy() {
        let params = EconomyParams {
            ny: 1,
            ymin: 8.0,
            ymax: 8.0,
            ..EconomyParams::default()
        };
        let economy = Economy::new(params).unwrap();
        let contract = economy.solve(&FixedPointSolver::default()).unwrap();

        assert!((contract.consumption[0] - 8.0).abs() < 1e-9);
        assert!(contract.initial_lender_value().abs() < 1e-8);
    }

    #[test]
    fn test_invalid_params() {
        let defaults = EconomyParams::default();
        let bad = [
            EconomyParams {
                beta: 1.0,
                ..defaults
            },
            EconomyParams {
                gamma: 0.0,
                ..defaults
            },
            EconomyParams { ny: 0, ..defaults },
            EconomyParams {
                ymin: 20.0,
                ..defaults
            },
            EconomyParams {
                lamb: 1.0,
                ..defaults
            },
            EconomyParams {
                ymax: f64::NAN,
                ..defaults
            },
        ];
        for params in bad {
            assert!(matches!(
                Economy::new(params),
                Err(FigureError::InvalidParameter { .. })
            ));
        }
    }
}
