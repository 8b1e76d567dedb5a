pub mod configuration;

pub mod engine {
    pub mod possibilityengine;
    pub mod recomputation;
}

pub mod joint {
    pub mod jointgrid;
    pub mod marginalizer;
    pub mod forwardpropagator;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod sampledcurve;
    }
    pub mod round;
}

pub mod possibility {
    pub mod domain;
    pub mod triangular;
    pub mod copula;
}

pub mod possibilityerror;
