//! Slot allocator example for slot-bitarray.
//!
//! Several workers share one array, each leasing slots for a while and then
//! handing them back.

use slot_bitarray::BitArray;
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== slot-bitarray - Slot Allocator Example ===\n");

    let slots = BitArray::new(10);
    println!("Created {:?}", slots);

    println!("\nAllocating until full:");
    while let Some(index) = slots.mark_free() {
        print!("{} ", index);
    }
    println!();
    println!("  len: {}, has_room: {}", slots.len(), slots.has_room());
    println!("  next mark_free: {:?}", slots.mark_free());

    println!("\nFreeing slots 3 and 7:");
    slots.unmark(3);
    slots.unmark(7);
    println!("  mark_free: {:?}", slots.mark_free());
    println!("  mark_free: {:?}", slots.mark_free());

    println!("\nChecked API:");
    println!("  try_get(42): {:?}", slots.try_get(42));
    println!("  try_mark_free(): {:?}", slots.try_mark_free());

    slots.reset();
    println!("\nAfter reset: {:?}", slots);

    println!("\nFour workers sharing 64 slots:");
    let shared = Arc::new(BitArray::new(64));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let leased: Vec<usize> = (0..8).filter_map(|_| shared.mark_free()).collect();
                println!("  worker {} leased {:?}", worker, leased);
                for index in leased {
                    shared.unmark(index);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    println!("  len after all workers returned their slots: {}", shared.len());
}
