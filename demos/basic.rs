use wigner::*;

fn main() {
    let theta = 0.25_f64;

    // -- Legendre polynomials over a degree window --
    println!("=== P_l(cos {theta}) for l = 0..=5 ===");
    let p = legendre_pl_seq(0, 5, theta.cos());
    for (l, v) in p.iter().enumerate() {
        println!("  P_{l} = {v:+.15e}");
    }

    // -- Wigner d-functions --
    println!("\n=== d^l_(2,-1)({theta}) for l = 2..=8 ===");
    let d = wigner_dl_seq(2, 8, 2, -1, theta);
    for (i, v) in d.iter().enumerate() {
        println!("  l = {}: {v:+.15e}", i + 2);
    }

    // -- 3j symbols: query the range, then fill --
    let (l1, l2, l3, m1) = (10.0_f64, 7.0, 5.0, 3.0);
    let range = wigner_3jm_range(l1, l2, l3, m1).unwrap();
    println!(
        "\n=== ({l1} {l2} {l3}; {m1} m2 ...) for m2 = {}..={} ===",
        range.min, range.max
    );
    let mut thrcof = vec![0.0_f64; range.count()];
    wigner_3jm(l1, l2, l3, m1, &mut thrcof).unwrap();
    for (i, v) in thrcof.iter().enumerate() {
        println!("  m2 = {}: {v:+.15e}", range.min + i as f64);
    }

    // -- Owned sequence in one call --
    let seq = wigner_3jm_seq(2.0_f64, 1.0, 1.0, 0.0).unwrap();
    println!("\n=== (2 1 1; 0 m2 ...) ===");
    println!("  values: {:?}", seq.values);

    // -- Inadmissible parameters are reported, not computed --
    let err = wigner_3jm_range(1.0_f64, 1.0, 5.0, 0.0).unwrap_err();
    println!("\n(1 1 5; 0): error {} ({err})", err.code());

    // -- f32 support --
    let mut p32 = [0.0_f32; 3];
    legendre_pl(0, 0.5_f32, &mut p32);
    println!("\nP_0..2(0.5) = {p32:?} (f32)");
}
