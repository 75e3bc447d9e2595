#![cfg(feature = "rayon")]

use cvclicker::kernel::rayon::{scan_full_par, scan_topk_par};
use cvclicker::kernel::scalar::ZnccScalar;
use cvclicker::{Frame, Kernel, MatchConfig, Matcher, Template, TemplateMatcher, TemplatePlan};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_template(width: usize, height: usize) -> Template {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.extend_from_slice(&[value as u8, (value ^ 0x5A) as u8, (y * 9 & 0xFF) as u8]);
        }
    }
    Template::new(data, width, height).unwrap()
}

fn noisy_scene(seed: u64, width: usize, height: usize) -> Frame {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height * 3).map(|_| rng.random::<u8>()).collect();
    Frame::new(data, width, height).unwrap()
}

#[test]
fn parallel_matches_sequential_on_embedded_target() {
    let template = make_template(24, 18);
    let mut scene = noisy_scene(11, 160, 120);
    scene.paste(template.view(), 92, 56).unwrap();

    for max_levels in [1, 4] {
        let sequential = Matcher::new(&template).unwrap().with_config(MatchConfig {
            max_levels,
            ..MatchConfig::default()
        });
        let parallel = Matcher::new(&template).unwrap().with_config(MatchConfig {
            parallel: true,
            max_levels,
            ..MatchConfig::default()
        });

        let seq = sequential.match_frame(scene.view()).unwrap().found().unwrap();
        let par = parallel.match_frame(scene.view()).unwrap().found().unwrap();
        assert_eq!((seq.x, seq.y), (92, 56));
        assert_eq!((par.x, par.y), (seq.x, seq.y));
        assert!((par.confidence - seq.confidence).abs() < 1e-6);
    }
}

#[test]
fn parallel_top_k_matches_sequential_top_k() {
    for seed in 0..3u64 {
        let scene = noisy_scene(seed + 20, 60, 45);
        let template = Template::from_frame(noisy_scene(seed + 200, 7, 6));
        let plan = TemplatePlan::from_view(template.view()).unwrap();

        let seq = ZnccScalar::scan_topk(scene.view(), &plan, 1e-6, 12).unwrap();
        let par = scan_topk_par::<ZnccScalar>(scene.view(), &plan, 1e-6, 12).unwrap();
        assert_eq!(seq.len(), 12);
        assert_eq!(par, seq);
    }
}

#[test]
fn parallel_scan_agrees_with_scalar_scan() {
    for seed in 0..4u64 {
        let scene = noisy_scene(seed, 70, 50);
        let template = Template::from_frame(noisy_scene(seed + 100, 9, 7));
        let plan = TemplatePlan::from_view(template.view()).unwrap();

        let scalar = ZnccScalar::scan_full(scene.view(), &plan, 1e-6).unwrap().unwrap();
        let par = scan_full_par::<ZnccScalar>(scene.view(), &plan, 1e-6)
            .unwrap()
            .unwrap();
        assert_eq!((par.x, par.y), (scalar.x, scalar.y));
        assert_eq!(par.score, scalar.score);
    }
}

#[test]
fn parallel_scan_rejects_oversized_template() {
    let scene = noisy_scene(5, 8, 8);
    let template = make_template(9, 4);
    let plan = TemplatePlan::from_view(template.view()).unwrap();
    assert!(scan_full_par::<ZnccScalar>(scene.view(), &plan, 1e-6).is_err());
}
