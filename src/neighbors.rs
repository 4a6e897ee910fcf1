/*
 * Neighbour Module
 *
 * Ranks the whole population by distance from a query boid. There is no
 * spatial index: every query measures every boid and sorts the result, which
 * is fine for the few hundred agents this simulation runs with.
 *
 * The ordering is a stable sort, so boids at the same distance keep their
 * population order. The query boid itself is part of the population and
 * always ranks first at distance 0.
 */

use crate::boid::Boid;

// Indices of every boid in the population, nearest first
pub fn rank_by_distance(query: &Boid, population: &[Boid]) -> Vec<usize> {
    let distances: Vec<f32> = population.iter().map(|other| query.distance(other)).collect();

    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order
}

// Copies of the `k` nearest boids, taken before the query boid is mutated
pub fn nearest_neighbours(query: &Boid, population: &[Boid], k: usize) -> Vec<Boid> {
    rank_by_distance(query, population)
        .into_iter()
        .take(k)
        .map(|i| population[i])
        .collect()
}
