///
/// Every way of picking one element from each domain, in domain order, produced one pick at a
/// time. No domains gives the single empty pick; any empty domain gives no picks at all.
///
/// Only the domains are held; the product itself is walked like an odometer, last domain
/// turning fastest.
///
pub struct CartesianProduct<T> {
    domains: Vec<Vec<T>>,
    indices: Vec<usize>,
    done: bool,
}

pub fn cartesian_product<T: Clone>(domains: Vec<Vec<T>>) -> CartesianProduct<T> {
    let done = domains.iter().any(Vec::is_empty);
    CartesianProduct {
        indices: vec![0; domains.len()],
        domains,
        done,
    }
}

impl<T: Clone> Iterator for CartesianProduct<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let pick = self
            .domains
            .iter()
            .zip(&self.indices)
            .map(|(domain, &i)| domain[i].clone())
            .collect();

        // Advance; running off the front means every pick has been produced.
        self.done = true;
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.domains[position].len() {
                self.done = false;
                break;
            }
            self.indices[position] = 0;
        }
        Some(pick)
    }
}
