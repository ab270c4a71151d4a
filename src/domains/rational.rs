//! The field of rational numbers.
//!
//! [Rational] stores machine-sized integers and keeps every value in
//! canonical form: lowest terms, positive denominator. Arithmetic reduces by
//! gcds before multiplying to keep intermediates small, but the
//! representation is bounded and can overflow on very large inputs.
//! Comparisons are performed by cross-multiplication in 128-bit arithmetic
//! and never overflow.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{EuclideanDomain, Field, Ring};

/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers with [Rational] elements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

pub(crate) fn gcd_signed(mut a: i64, mut b: i64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps for i64::MIN % -1, which is 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

/// A rational number in canonical form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    /// Create a new rational number, reduced to lowest terms with a
    /// positive denominator. A zero denominator is replaced by 1, so
    /// `Rational::new(n, 0)` yields the whole number `n` and cannot be
    /// used to signal an error.
    pub fn new(numerator: i64, denominator: i64) -> Rational {
        let (mut numerator, mut denominator) = if denominator == 0 {
            (numerator, 1)
        } else {
            (numerator, denominator)
        };

        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        let g = gcd_signed(numerator, denominator) as i64;
        Rational {
            numerator: numerator / g,
            denominator: denominator / g,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn zero() -> Rational {
        Rational {
            numerator: 0,
            denominator: 1,
        }
    }

    pub fn one() -> Rational {
        Rational {
            numerator: 1,
            denominator: 1,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    pub fn abs(&self) -> Rational {
        if self.is_negative() {
            self.neg()
        } else {
            *self
        }
    }

    pub fn neg(&self) -> Rational {
        Q.neg(self)
    }

    /// Invert the number. Panics when it is zero.
    pub fn inv(&self) -> Rational {
        Q.inv(self)
    }

    /// Divide by `other`, returning `None` when `other` is zero.
    pub fn try_div(&self, other: &Rational) -> Option<Rational> {
        Q.try_div(self, other)
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::zero()
    }
}

impl From<i64> for Rational {
    #[inline]
    fn from(value: i64) -> Self {
        Rational {
            numerator: value,
            denominator: 1,
        }
    }
}

impl From<(i64, i64)> for Rational {
    /// Construct the canonical fraction `value.0 / value.1`.
    #[inline]
    fn from(value: (i64, i64)) -> Self {
        Rational::new(value.0, value.1)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.denominator == b.denominator {
            let num = a.numerator + b.numerator;
            let g = gcd_signed(num, a.denominator) as i64;
            return Rational {
                numerator: num / g,
                denominator: a.denominator / g,
            };
        }

        let denom_gcd = gcd_signed(a.denominator, b.denominator) as i64;
        let a_den_red = a.denominator / denom_gcd;
        let b_den_red = b.denominator / denom_gcd;

        let num = a.numerator * b_den_red + b.numerator * a_den_red;
        let den = b_den_red * a.denominator;

        // any common factor of the sum and the denominator divides denom_gcd
        let g = gcd_signed(num, denom_gcd) as i64;
        Rational {
            numerator: num / g,
            denominator: den / g,
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let gcd1 = gcd_signed(a.numerator, b.denominator) as i64;
        let gcd2 = gcd_signed(a.denominator, b.numerator) as i64;

        Rational {
            numerator: (a.numerator / gcd1) * (b.numerator / gcd2),
            denominator: (a.denominator / gcd2) * (b.denominator / gcd1),
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Rational {
            numerator: -a.numerator,
            denominator: a.denominator,
        }
    }

    fn zero(&self) -> Self::Element {
        Rational::zero()
    }

    fn one(&self) -> Self::Element {
        Rational::one()
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Rational {
            numerator: n,
            denominator: 1,
        }
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.numerator == 0
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.numerator == 1 && a.denominator == 1
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if Self::is_zero(b) {
            None
        } else {
            Some(self.div(a, b))
        }
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        Rational::zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), Rational::zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let num = gcd_signed(a.numerator, b.numerator) as i64;
        let den_gcd = gcd_signed(a.denominator, b.denominator) as i64;

        // gcd of the numerators over the lcm of the denominators
        Rational {
            numerator: num,
            denominator: (a.denominator / den_gcd) * b.denominator,
        }
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        assert!(a.numerator != 0, "0 is not invertible");

        if a.numerator < 0 {
            Rational {
                numerator: -a.denominator,
                denominator: -a.numerator,
            }
        } else {
            Rational {
                numerator: a.denominator,
                denominator: a.numerator,
            }
        }
    }

    fn try_inv(&self, a: &Self::Element) -> Option<Self::Element> {
        if a.numerator == 0 {
            None
        } else {
            Some(self.inv(a))
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    /// Exact ordering by cross-multiplication; valid since denominators
    /// are always positive.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }

        let a = self.numerator as i128 * other.denominator as i128;
        let b = self.denominator as i128 * other.numerator as i128;
        a.cmp(&b)
    }
}

impl PartialEq<i64> for Rational {
    /// Test whether the number is exactly the integer `other`.
    #[inline]
    fn eq(&self, other: &i64) -> bool {
        self.denominator == 1 && self.numerator == *other
    }
}

impl PartialEq<Rational> for i64 {
    #[inline]
    fn eq(&self, other: &Rational) -> bool {
        other == self
    }
}

impl PartialOrd<i64> for Rational {
    #[inline]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        (self.numerator as i128).partial_cmp(&(*other as i128 * self.denominator as i128))
    }
}

impl PartialOrd<Rational> for i64 {
    #[inline]
    fn partial_cmp(&self, other: &Rational) -> Option<Ordering> {
        other.partial_cmp(self).map(|x| x.reverse())
    }
}

impl Add<Rational> for Rational {
    type Output = Rational;

    fn add(self, other: Rational) -> Self::Output {
        Q.add(&self, &other)
    }
}

impl Sub<Rational> for Rational {
    type Output = Rational;

    fn sub(self, other: Rational) -> Self::Output {
        Q.sub(&self, &other)
    }
}

impl Mul<Rational> for Rational {
    type Output = Rational;

    fn mul(self, other: Rational) -> Self::Output {
        Q.mul(&self, &other)
    }
}

impl Div<Rational> for Rational {
    type Output = Rational;

    fn div(self, other: Rational) -> Self::Output {
        Q.div(&self, &other)
    }
}

impl<'a> Add<&'a Rational> for Rational {
    type Output = Rational;

    fn add(self, other: &'a Rational) -> Self::Output {
        Q.add(&self, other)
    }
}

impl<'a> Sub<&'a Rational> for Rational {
    type Output = Rational;

    fn sub(self, other: &'a Rational) -> Self::Output {
        Q.sub(&self, other)
    }
}

impl<'a> Mul<&'a Rational> for Rational {
    type Output = Rational;

    fn mul(self, other: &'a Rational) -> Self::Output {
        Q.mul(&self, other)
    }
}

impl<'a> Div<&'a Rational> for Rational {
    type Output = Rational;

    fn div(self, other: &'a Rational) -> Self::Output {
        Q.div(&self, other)
    }
}

impl<'a, 'b> Add<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn add(self, other: &'a Rational) -> Self::Output {
        Q.add(self, other)
    }
}

impl<'a, 'b> Sub<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn sub(self, other: &'a Rational) -> Self::Output {
        Q.sub(self, other)
    }
}

impl<'a, 'b> Mul<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn mul(self, other: &'a Rational) -> Self::Output {
        Q.mul(self, other)
    }
}

impl<'a, 'b> Div<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn div(self, other: &'a Rational) -> Self::Output {
        Q.div(self, other)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Q.neg(&self)
    }
}

impl AddAssign<Rational> for Rational {
    fn add_assign(&mut self, other: Rational) {
        Q.add_assign(self, &other)
    }
}

impl SubAssign<Rational> for Rational {
    fn sub_assign(&mut self, other: Rational) {
        Q.sub_assign(self, &other)
    }
}

impl MulAssign<Rational> for Rational {
    fn mul_assign(&mut self, other: Rational) {
        Q.mul_assign(self, &other)
    }
}

impl DivAssign<Rational> for Rational {
    fn div_assign(&mut self, other: Rational) {
        Q.div_assign(self, &other)
    }
}

impl<'a> AddAssign<&'a Rational> for Rational {
    fn add_assign(&mut self, other: &'a Rational) {
        Q.add_assign(self, other)
    }
}

impl<'a> SubAssign<&'a Rational> for Rational {
    fn sub_assign(&mut self, other: &'a Rational) {
        Q.sub_assign(self, other)
    }
}

impl<'a> MulAssign<&'a Rational> for Rational {
    fn mul_assign(&mut self, other: &'a Rational) {
        Q.mul_assign(self, other)
    }
}

impl<'a> DivAssign<&'a Rational> for Rational {
    fn div_assign(&mut self, other: &'a Rational) {
        Q.div_assign(self, other)
    }
}

impl<'a> std::iter::Sum<&'a Self> for Rational {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |a, b| a + b)
    }
}

impl std::iter::Sum for Rational {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |a, b| a + b)
    }
}
