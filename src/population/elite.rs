//! The elite set: the best distinct members seen so far, up to a fixed capacity.

use crate::error::{GeneticError, Result};
use crate::fitness::Fitness;
use crate::population::member::PopulationMember;

/// A bounded set of the fittest distinct members ever offered, kept in ascending
/// order of fitness (index 0 is the least fit elite).
///
/// Two members are duplicates when their candidates are equal, regardless of
/// fitness; offering a duplicate is a no-op. Accepted members are copied in, so the
/// set never aliases the caller's member.
///
/// # Examples
///
/// ```
/// use evocore::population::{EliteSet, PopulationMember};
///
/// let mut elites = EliteSet::new(Vec::new(), 2).unwrap();
/// elites.offer(&PopulationMember::new('a', 1.0));
/// elites.offer(&PopulationMember::new('b', 3.0));
/// elites.offer(&PopulationMember::new('c', 2.0));
///
/// let kept: Vec<char> = elites.iter().map(|m| *m.candidate()).collect();
/// assert_eq!(kept, vec!['c', 'b']);
/// ```
#[derive(Debug, Clone)]
pub struct EliteSet<C, T> {
    members: Vec<PopulationMember<C, T>>,
    capacity: usize,
}

impl<C, T> EliteSet<C, T>
where
    C: Clone + PartialEq,
    T: Fitness,
{
    /// Creates an elite set holding the best distinct members of `initial`.
    ///
    /// # Arguments
    ///
    /// * `initial` - Members offered in iteration order.
    /// * `capacity` - The maximum number of elites kept.
    ///
    /// # Returns
    ///
    /// The elite set, sorted in ascending fitness order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `capacity` is 0.
    pub fn new<I>(initial: I, capacity: usize) -> Result<Self>
    where
        I: IntoIterator<Item = PopulationMember<C, T>>,
    {
        if capacity == 0 {
            return Err(GeneticError::InvalidArgument(
                "Elite set capacity must be at least 1".to_string(),
            ));
        }
        let mut elites = Self {
            members: Vec::with_capacity(capacity),
            capacity,
        };
        for member in initial {
            elites.offer(&member);
        }
        Ok(elites)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The maximum number of elites.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Offers a copy of `member`. Returns `true` if it was added.
    pub fn offer(&mut self, member: &PopulationMember<C, T>) -> bool {
        self.offer_parts(member.candidate(), member.fitness(), member.parameters())
    }

    /// Offers each member in iteration order. Returns how many were added.
    pub fn offer_all<'a, I>(&mut self, members: I) -> usize
    where
        I: IntoIterator<Item = &'a PopulationMember<C, T>>,
        C: 'a,
        T: 'a,
    {
        members
            .into_iter()
            .filter(|member| self.offer(member))
            .count()
    }

    /// Offers a member given by its parts; the candidate and parameters are cloned
    /// only if it is accepted.
    pub(crate) fn offer_parts(&mut self, candidate: &C, fitness: T, parameters: &[f64]) -> bool {
        let full = self.members.len() >= self.capacity;
        if full && !(fitness > self.members[0].fitness()) {
            return false;
        }
        if self.members.iter().any(|m| m.candidate() == candidate) {
            return false;
        }
        if full {
            self.members.remove(0);
        }
        let position = self.members.partition_point(|m| m.fitness() <= fitness);
        self.members.insert(
            position,
            PopulationMember::with_parameters(candidate.clone(), fitness, parameters.to_vec()),
        );
        true
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// The elite at `index` in ascending fitness order.
    pub fn get(&self, index: usize) -> Option<&PopulationMember<C, T>> {
        self.members.get(index)
    }

    /// The fittest elite.
    pub fn most_fit(&self) -> Option<&PopulationMember<C, T>> {
        self.members.last()
    }

    /// The least fit elite.
    pub fn least_fit(&self) -> Option<&PopulationMember<C, T>> {
        self.members.first()
    }

    /// Iterates in ascending fitness order.
    pub fn iter(&self) -> EliteIter<'_, C, T> {
        EliteIter {
            members: &self.members,
            position: 0,
        }
    }
}

impl<'a, C, T> IntoIterator for &'a EliteSet<C, T>
where
    C: Clone + PartialEq,
    T: Fitness,
{
    type Item = &'a PopulationMember<C, T>;
    type IntoIter = EliteIter<'a, C, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`EliteSet`] in ascending fitness order.
#[derive(Debug, Clone)]
pub struct EliteIter<'a, C, T> {
    members: &'a [PopulationMember<C, T>],
    position: usize,
}

impl<'a, C, T> EliteIter<'a, C, T> {
    /// Like `next`, but reports exhaustion as an error.
    ///
    /// # Errors
    ///
    /// Returns `NoMoreElements` once every elite has been visited.
    pub fn try_next(&mut self) -> Result<&'a PopulationMember<C, T>> {
        self.next().ok_or(GeneticError::NoMoreElements)
    }
}

impl<'a, C, T> Iterator for EliteIter<'a, C, T> {
    type Item = &'a PopulationMember<C, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let member = self.members.get(self.position)?;
        self.position += 1;
        Some(member)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.members.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<C, T> ExactSizeIterator for EliteIter<'_, C, T> {}
