/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2+3*4 = 14`
    ConstantFold,

    /// `add(a) = a`
    /// `multiply() = 1`
    Unwrap,

    /// `a+(b+c) = a+b+c`
    /// `a*(b*c) = a*b*c`
    Flatten,

    /// `0+a = a`
    AddZero,

    /// `2+x+3 = 5+x`
    AddNumbers,

    /// `a + b/c = (a*c + b)/c`
    CommonDenominator,

    /// `a+a = 2a`
    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `a^2 + a*b = a*(a + b)`
    FactorCommonBase,

    /// `a-a = 0`
    SubtractSelf,

    /// `a-b = a + -1*b`
    SubtractToAdd,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `2*x*3 = 6*x`
    MultiplyNumbers,

    /// `a*(b/c) = (a*b)/c`
    MultiplyFraction,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `a^b*a^c = a^(b+c)`
    /// `a^c*b^c = (a*b)^c`
    CombineLikeFactors,

    /// `0/a = 0`
    DivideZero,

    /// `a/a = 1`
    DivideSelf,

    /// `(-a)/a = -1`
    DivideOpposite,

    /// `a/1 = a`
    DivideOne,

    /// `(2i*a)/i = 2a`
    DivideNumber,

    /// `a/(-b) = (-a)/b`
    NegateDenominator,

    /// `(a/b)/c = a/(b*c)`
    /// `a/(b/c) = (a*c)/b`
    NestedFraction,

    /// `a^3/a = a^2`
    CancelFactors,

    /// `4a/6 = 2a/3`
    ReduceFraction,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `a^0 = 1`
    PowerZero,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `x+2 = 2+x`, or the other way around
    Reorder,
}
