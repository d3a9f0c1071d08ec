#[derive(clap::Parser, Debug)]
#[clap(about, long_about = None)]
pub(crate) struct Cli {
    /// The expression to evaluate, e.g. "2*{0}+1" or "(x+y)/2"
    pub expression: String,

    /// Argument values the expression's variables refer to
    pub args: Vec<f64>,
}
