use std::collections::HashMap;

lazy_static! {
    /// Named constants available through
    /// [`Symbols::with_constants`](struct.Symbols.html#method.with_constants)
    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut map = HashMap::<&'static str, f64>::new();
        map.insert("pi", std::f64::consts::PI);
        map.insert("tau", std::f64::consts::TAU);
        map.insert("e", std::f64::consts::E);
        map.insert("phi", 1.618_033_988_749_895);
        map.insert("sqrt2", std::f64::consts::SQRT_2);
        map.insert("ln2", std::f64::consts::LN_2);
        map.insert("ln10", std::f64::consts::LN_10);
        map.insert("inf", f64::INFINITY);
        map.insert("nan", f64::NAN);
        map.shrink_to_fit();
        map
    };
}
