//! Limited-memory BFGS minimiser over dense parameter vectors.
use std::collections::VecDeque;

/// Sufficient-decrease constant of the Armijo condition.
const ARMIJO_C1: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 50;
/// Curvature pairs with `s·y` below this are skipped.
const CURVATURE_EPS: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LbfgsParams {
    /// Number of correction pairs kept.
    pub memory: usize,
    pub max_iter: usize,
    /// Stop once `max |∇f| <= gradient_tol`.
    pub gradient_tol: f64,
    /// Stop once the relative decrease of `f` in one step falls below this.
    pub ftol: f64,
}

impl Default for LbfgsParams {
    fn default() -> Self {
        Self {
            memory: 10,
            max_iter: 1000,
            gradient_tol: 1e-4,
            ftol: 1e7 * f64::EPSILON,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Minimum {
    pub point: Vec<f64>,
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

struct Correction {
    s: Vec<f64>,
    y: Vec<f64>,
    rho: f64,
}

/// Minimises `objective`, which returns `f(x)` and writes `∇f(x)` into its
/// second argument.
pub fn minimize<F>(mut objective: F, initial: Vec<f64>, params: &LbfgsParams) -> Minimum
where
    F: FnMut(&[f64], &mut [f64]) -> f64,
{
    let n = initial.len();
    let mut x = initial;
    let mut grad = vec![0.0; n];
    let mut fx = objective(&x, &mut grad);
    let mut history: VecDeque<Correction> = VecDeque::with_capacity(params.memory);
    let mut iterations = 0;
    let mut converged = max_abs(&grad) <= params.gradient_tol;

    while !converged && iterations < params.max_iter {
        iterations += 1;

        let mut direction = search_direction(&grad, &history);
        let mut slope = dot(&grad, &direction);
        if slope >= 0.0 {
            // Not a descent direction: restart from steepest descent.
            history.clear();
            direction = search_direction(&grad, &history);
            slope = dot(&grad, &direction);
        }

        let mut step = 1.0;
        let mut next_x = vec![0.0; n];
        let mut next_grad = vec![0.0; n];
        let mut next_f = f64::INFINITY;
        let mut accepted = false;
        for _ in 0..MAX_BACKTRACKS {
            for ((xi, &x0), &d) in next_x.iter_mut().zip(&x).zip(&direction) {
                *xi = x0 + step * d;
            }
            next_f = objective(&next_x, &mut next_grad);
            if next_f.is_finite() && next_f <= fx + ARMIJO_C1 * step * slope {
                accepted = true;
                break;
            }
            step *= 0.5;
        }
        if !accepted {
            break;
        }

        let s: Vec<f64> = next_x.iter().zip(&x).map(|(a, b)| a - b).collect();
        let y: Vec<f64> = next_grad.iter().zip(&grad).map(|(a, b)| a - b).collect();
        let sy = dot(&s, &y);
        if sy > CURVATURE_EPS {
            remember(&mut history, Correction { s, y, rho: 1.0 / sy }, params.memory);
        }

        let relative_decrease = (fx - next_f) / fx.abs().max(next_f.abs()).max(1.0);
        x = next_x;
        grad = next_grad;
        fx = next_f;
        converged =
            max_abs(&grad) <= params.gradient_tol || relative_decrease <= params.ftol;
    }

    Minimum {
        point: x,
        value: fx,
        iterations,
        converged,
    }
}

/// Appends a correction pair, evicting the oldest beyond `memory`.
/// With `memory == 0` nothing is kept and the search is steepest descent.
fn remember(history: &mut VecDeque<Correction>, correction: Correction, memory: usize) {
    if memory == 0 {
        return;
    }
    while history.len() >= memory {
        history.pop_front();
    }
    history.push_back(correction);
}

/// Two-loop recursion: returns `-H·∇f` for the current inverse-Hessian estimate.
fn search_direction(grad: &[f64], history: &VecDeque<Correction>) -> Vec<f64> {
    let mut q = grad.to_vec();
    let mut alphas = Vec::with_capacity(history.len());
    for correction in history.iter().rev() {
        let alpha = correction.rho * dot(&correction.s, &q);
        axpy(-alpha, &correction.y, &mut q);
        alphas.push(alpha);
    }

    let gamma = match history.back() {
        Some(last) => dot(&last.s, &last.y) / dot(&last.y, &last.y),
        None => 1.0 / dot(grad, grad).sqrt().max(f64::EPSILON),
    };
    for value in &mut q {
        *value *= gamma;
    }

    for (correction, alpha) in history.iter().zip(alphas.iter().rev()) {
        let beta = correction.rho * dot(&correction.y, &q);
        axpy(alpha - beta, &correction.s, &mut q);
    }

    for value in &mut q {
        *value = -*value;
    }
    q
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}
