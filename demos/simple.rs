//! An example of building a network from a topology file and evaluating it. Requires the `json`
//! feature.

use ffnet::{Network, Topology};

fn main() {
    // Load the shape of the network
    let topology = Topology::load_file("test_data/topology.json").unwrap();

    // Build it with reproducible weights
    let mut network = Network::from_seed(&topology, 42).unwrap();

    let output = network.evaluate(&[0.003, 0.008, 0.002]).unwrap();
    println!("output: {:?}", output);

    // Inputs can also be written in place
    network.mut_inputs().copy_from_slice(&[1.0, 0.0, -1.0]);
    network.compute().unwrap();
    println!("output 2: {:?}", network.outputs());

    for (i, layer) in network.layers().iter().enumerate() {
        println!(
            "layer {}: {} layer, {} inputs, {} neurons, activation {}",
            i,
            layer.kind(),
            layer.num_inputs(),
            layer.num_neurons(),
            layer.activation()
        );
    }
}
