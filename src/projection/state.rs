//! Loan and price state carried from one projection year to the next

use crate::parameters::{EnergyParameters, FinancialParameters};

/// A linearly amortized loan: equal principal each year, interest on the
/// balance outstanding before that year's repayment
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    /// Principal not yet repaid
    pub outstanding_balance: f64,

    /// Principal repaid every year, constant for the loan's lifetime
    pub annual_repayment: f64,

    /// Repayment years left
    pub remaining_years: u32,
}

/// What a loan cost in one year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoanPayment {
    pub repayment: f64,
    pub interest: f64,
}

impl Loan {
    /// Originate a loan of `principal` repaid over `term_years`
    pub fn originate(principal: f64, term_years: u32) -> Self {
        Self {
            outstanding_balance: principal,
            annual_repayment: principal / term_years as f64,
            remaining_years: term_years,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_years > 0
    }

    /// Charge one year of interest at `rate` (decimal) and repay one year of
    /// principal. A settled loan costs nothing.
    pub fn amortize_year(&mut self, rate: f64) -> LoanPayment {
        if !self.is_active() {
            return LoanPayment::default();
        }

        let interest = self.outstanding_balance * rate;
        let repayment = self.annual_repayment;
        self.outstanding_balance -= repayment;
        self.remaining_years -= 1;

        if self.remaining_years == 0 {
            // Repayments sum to the principal; clear the rounding residue
            self.outstanding_balance = 0.0;
        }

        LoanPayment { repayment, interest }
    }
}

/// State of one heat-pump projection between years
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Year about to be projected (1-indexed); 0 before the first year
    pub year: u32,

    /// Investment loan, originated at t = 0
    pub primary_loan: Loan,

    /// Active refurbishment loans in origination order
    pub refurbishment_loans: Vec<Loan>,

    /// Energy price for the current year
    pub unit_price: f64,
}

impl ProjectionState {
    /// State at t = 0: investment loan originated, no refurbishments
    pub fn initial(financial: &FinancialParameters, energy: &EnergyParameters) -> Self {
        Self {
            year: 0,
            primary_loan: Loan::originate(financial.investment, financial.loan_term_years),
            refurbishment_loans: Vec::new(),
            unit_price: energy.unit_price,
        }
    }

    /// Move to the next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Originate a refurbishment loan if one is due this year
    pub fn originate_refurbishment(&mut self, financial: &FinancialParameters) -> bool {
        if !financial.refurbishment_due(self.year) {
            return false;
        }
        self.refurbishment_loans.push(Loan::originate(
            financial.refurbishment_amount,
            financial.refurbishment_term_years,
        ));
        true
    }

    /// Amortize every active refurbishment loan for one year and drop the
    /// ones that are settled. Returns the summed payment.
    pub fn amortize_refurbishments(&mut self, rate: f64) -> LoanPayment {
        let mut total = LoanPayment::default();
        for loan in &mut self.refurbishment_loans {
            let payment = loan.amortize_year(rate);
            total.repayment += payment.repayment;
            total.interest += payment.interest;
        }
        self.refurbishment_loans.retain(Loan::is_active);
        total
    }

    /// Apply one year of price inflation
    pub fn inflate_price(&mut self, energy: &EnergyParameters) {
        self.unit_price *= energy.growth_factor();
    }
}
