use nalgebra::DVector;

pub fn plot_solution(arg: String, varname: String, t_result: DVector<f64>, u_result: DVector<f64>) {
    use plotters::prelude::*;
    let x = t_result;
    let y = u_result;
    let x_min = x.min();
    let x_max = x.max();
    let y_min = y.min();
    let y_max = y.max();
    // constant trajectories still need a non-degenerate axis range
    let pad = if y_max > y_min {
        0.05 * (y_max - y_min)
    } else {
        1.0
    };
    let filename = format!("{}.png", varname);
    let root_area = BitMapBackend::new(&filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root_area)
        .caption(format!("{}", varname), ("sans-serif", 50))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(x_min..x_max, y_min - pad..y_max + pad)
        .unwrap();

    chart
        .configure_mesh()
        .x_desc(&arg)
        .y_desc(&varname)
        .draw()
        .unwrap();

    let series: Vec<(f64, f64)> = x.iter().zip(y.iter()).map(|(&x, &y)| (x, y)).collect();
    chart
        .draw_series(LineSeries::new(series, &Palette99::pick(0)))
        .unwrap()
        .label(format!(" {}", varname))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(0)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();
}
