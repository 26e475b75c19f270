//! Composite: treat single objects and groups of them uniformly.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

use crate::console;
use crate::error::Result;

// =============================================================================
// File-system tree
// =============================================================================

pub trait Component {
    fn name(&self) -> &str;
    fn write_tree(&self, out: &mut String, depth: usize);
    fn file_count(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct File {
    name: String,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for File {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        out.push_str(&format!("{}/{}\n", " ".repeat(depth), self.name));
    }

    fn file_count(&self) -> usize {
        1
    }
}

pub struct Directory {
    name: String,
    children: Vec<Box<dyn Component>>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn add(&mut self, child: impl Component + 'static) -> &mut Self {
        self.children.push(Box::new(child));
        self
    }

    /// Removes the first direct child with this name.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Component>> {
        let index = self.children.iter().position(|c| c.name() == name)?;
        Some(self.children.remove(index))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Component for Directory {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        out.push_str(&format!("{}/{}\n", " ".repeat(depth), self.name));
        for child in &self.children {
            child.write_tree(out, depth + 1);
        }
    }

    fn file_count(&self) -> usize {
        self.children.iter().map(|c| c.file_count()).sum()
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        f.write_str(&out)
    }
}

// =============================================================================
// Neural network
// =============================================================================

static NEXT_NETWORK: AtomicUsize = AtomicUsize::new(0);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    #[error("neuron {0:?} does not belong to this network")]
    ForeignNeuron(NeuronId),
}

/// Index of a neuron, tagged with the `Network` that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeuronId {
    network: usize,
    index: usize,
}

#[derive(Debug, Default, Clone)]
struct Neuron {
    inputs: Vec<NeuronId>,
    outputs: Vec<NeuronId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    neurons: Vec<NeuronId>,
}

/// Anything that can take part in a connection: one neuron or many.
pub trait NeuronSet {
    fn neurons(&self) -> &[NeuronId];
}

impl NeuronSet for NeuronId {
    fn neurons(&self) -> &[NeuronId] {
        std::slice::from_ref(self)
    }
}

impl NeuronSet for Layer {
    fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }
}

/// Owns every neuron; connections are stored as ids, so cycles are fine.
#[derive(Debug)]
pub struct Network {
    id: usize,
    neurons: Vec<Neuron>,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            id: NEXT_NETWORK.fetch_add(1, Ordering::Relaxed),
            neurons: Vec::new(),
        }
    }
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_neuron(&mut self) -> NeuronId {
        self.neurons.push(Neuron::default());
        NeuronId {
            network: self.id,
            index: self.neurons.len() - 1,
        }
    }

    pub fn add_layer(&mut self, size: usize) -> Layer {
        Layer {
            neurons: (0..size).map(|_| self.add_neuron()).collect(),
        }
    }

    fn neuron(&self, id: NeuronId) -> std::result::Result<&Neuron, NetworkError> {
        if id.network != self.id {
            return Err(NetworkError::ForeignNeuron(id));
        }
        self.neurons
            .get(id.index)
            .ok_or(NetworkError::ForeignNeuron(id))
    }

    /// Connects every neuron of `from` to every neuron of `to`. Connecting a
    /// set to itself does nothing. Returns the number of links added.
    ///
    /// Every id is checked before any link is made, so a foreign neuron
    /// leaves the network untouched.
    pub fn connect<A, B>(&mut self, from: &A, to: &B) -> std::result::Result<usize, NetworkError>
    where
        A: NeuronSet + ?Sized,
        B: NeuronSet + ?Sized,
    {
        if from.neurons() == to.neurons() {
            return Ok(0);
        }
        for &id in from.neurons().iter().chain(to.neurons()) {
            self.neuron(id)?;
        }

        let mut links = 0;
        for &source in from.neurons() {
            for &target in to.neurons() {
                self.neurons[source.index].outputs.push(target);
                self.neurons[target.index].inputs.push(source);
                links += 1;
            }
        }
        Ok(links)
    }

    pub fn inputs(&self, id: NeuronId) -> std::result::Result<&[NeuronId], NetworkError> {
        Ok(&self.neuron(id)?.inputs)
    }

    pub fn outputs(&self, id: NeuronId) -> std::result::Result<&[NeuronId], NetworkError> {
        Ok(&self.neuron(id)?.outputs)
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }
}

pub fn sample_tree() -> Directory {
    let mut patterns = Directory::new("gof-design-patterns");
    patterns
        .add(File::new("Adapter.cs"))
        .add(File::new("Builder.cs"))
        .add(File::new("Composite.cs"));

    let mut structures = Directory::new("data-structures");
    structures
        .add(File::new("BinaryTree.cs"))
        .add(File::new("Graph.cs"));

    let mut projects = Directory::new("projects");
    projects.add(structures).add(patterns);

    let mut root = Directory::new("Developer");
    root.add(projects);
    root
}

pub fn run() -> Result<()> {
    console::demo("Composite");

    let tree = sample_tree();
    print!("{tree}");
    println!("Files: {}", tree.file_count());

    let mut network = Network::new();
    let n1 = network.add_neuron();
    let n2 = network.add_neuron();
    let l1 = network.add_layer(3);
    let l2 = network.add_layer(4);

    let links = network.connect(&n1, &n2)?
        + network.connect(&n2, &l1)?
        + network.connect(&l2, &n1)?
        + network.connect(&l1, &l2)?;
    println!(
        "Neurons: {} | Links: {links} | n1 inputs: {} | n1 outputs: {}",
        network.len(),
        network.inputs(n1)?.len(),
        network.outputs(n1)?.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_listing() {
        let listing = sample_tree().to_string();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            &lines[..4],
            ["/Developer", " /projects", "  /data-structures", "   /BinaryTree.cs"]
        );
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_directory_add_remove() {
        let mut dir = Directory::new("docs");
        dir.add(File::new("a.md")).add(File::new("b.md"));
        assert_eq!(dir.file_count(), 2);

        let removed = dir.remove("a.md").unwrap();
        assert_eq!(removed.name(), "a.md");
        assert!(dir.remove("missing").is_none());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_file_count_is_recursive() {
        assert_eq!(sample_tree().file_count(), 5);
    }

    #[test]
    fn test_connect_neurons_and_layers_uniformly() {
        let mut network = Network::new();
        let n = network.add_neuron();
        let layer = network.add_layer(3);

        assert_eq!(network.connect(&n, &layer), Ok(3));
        assert_eq!(network.outputs(n).unwrap().len(), 3);
        for id in layer.neurons() {
            assert_eq!(network.inputs(*id).unwrap(), [n]);
        }

        let other = network.add_layer(2);
        assert_eq!(network.connect(&layer, &other), Ok(6));
    }

    #[test]
    fn test_self_connection_is_skipped() {
        let mut network = Network::new();
        let layer = network.add_layer(2);
        let n = network.add_neuron();
        assert_eq!(network.connect(&layer, &layer), Ok(0));
        assert_eq!(network.connect(&n, &n), Ok(0));
        assert!(network.outputs(n).unwrap().is_empty());
    }

    #[test]
    fn test_foreign_neurons_are_rejected_without_changes() {
        let mut small = Network::new();
        let n = small.add_neuron();

        let mut big = Network::new();
        let big_layer = big.add_layer(5);
        let stranger = big_layer.neurons()[0];

        assert_eq!(
            small.connect(&n, &big_layer),
            Err(NetworkError::ForeignNeuron(stranger))
        );
        assert!(small.outputs(n).unwrap().is_empty());
        assert_eq!(small.inputs(stranger), Err(NetworkError::ForeignNeuron(stranger)));
        assert_eq!(small.outputs(stranger), Err(NetworkError::ForeignNeuron(stranger)));
    }

    #[test]
    fn test_same_index_from_another_network_is_foreign() {
        let mut first = Network::new();
        let a = first.add_neuron();
        let mut second = Network::new();
        let b = second.add_neuron();

        assert!(first.connect(&a, &b).is_err());
        assert!(first.inputs(a).unwrap().is_empty());
    }
}
