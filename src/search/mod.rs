pub mod alphabeta;
pub mod eval;
pub mod safety;

pub use alphabeta::{minimax_reference, SearchParams, SearchResult, Searcher};
pub use eval::{EvalWeights, Evaluator, TerritoryDiff, WeightedEval};
