use crate::{boid::Boid, options::SimOptions};

// a tracker owns the flock's agents and the data structure used to answer
// spatial queries about them; implementations differ only in how neighbours
// are found, the steering semantics are shared through Boid

pub trait Tracker {
    fn new(entities: Vec<Boid>, run_options: &SimOptions) -> Self
    where
        Self: Sized;

    /// Advances every agent by exactly one discrete step.
    ///
    /// Implementations compute every successor state from the pre-step
    /// generation and only then commit them, so no agent ever observes a
    /// neighbour's same-step update (position or velocity).
    fn update(&mut self, run_options: &SimOptions);

    /// Current agent states, for the caller to render or inspect.
    fn view(&self) -> &[Boid];

    /// All agents strictly within `nearby_distance` of `boid`, excluding
    /// the agent itself.
    fn get_neighbours<'a>(&'a self, boid: &Boid, run_options: &SimOptions) -> Vec<&'a Boid>;

    /// Replaces the population wholesale.
    fn restart(&mut self, entities: Vec<Boid>);
}
